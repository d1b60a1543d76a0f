//! Indicator trait definitions.

/// Trait for technical indicators computed over a price column.
///
/// Implementations return one output per input position, so the result
/// lines up index for index with the data passed in.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closing prices), oldest first
    ///
    /// # Returns
    /// A vector with the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the number of data points needed before the output is meaningful.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate and return only the most recent value.
    fn latest(&self, data: &[f64]) -> Option<Self::Output> {
        self.calculate(data).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RunningSum;

    impl Indicator for RunningSum {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            data.iter()
                .scan(0.0, |acc, &x| {
                    *acc += x;
                    Some(*acc)
                })
                .collect()
        }

        fn period(&self) -> usize {
            1
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_latest() {
        let indicator = RunningSum;
        assert_eq!(indicator.latest(&[1.0, 2.0, 3.0]), Some(6.0));
        assert_eq!(indicator.latest(&[]), None);
    }

    #[test]
    fn test_indicator_calculate_aligned() {
        let result = RunningSum.calculate(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(result.len(), 4);
        assert!((result[3] - 10.0).abs() < 0.001);
    }
}

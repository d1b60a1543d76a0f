//! Password gate in front of the dashboard.
//!
//! The configured secret is a salted HMAC-SHA256 digest, never the password
//! itself. Comparison goes through `Mac::verify_slice`, which is constant-time.

use hmac::{Hmac, Mac};
use scanner_core::error::AccessError;
use sha2::Sha256;

use crate::settings::AuthSettings;

type HmacSha256 = Hmac<Sha256>;

/// Checks a supplied password against the configured digest.
#[derive(Debug, Clone)]
pub struct AccessGate {
    salt: String,
    expected: Option<Vec<u8>>,
}

impl AccessGate {
    /// Build the gate from auth settings.
    ///
    /// Returns `Ok(None)` when the gate is disabled.
    pub fn from_settings(settings: &AuthSettings) -> Result<Option<Self>, AccessError> {
        if !settings.enabled {
            return Ok(None);
        }

        let hash = settings
            .password_hash
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(AccessError::NotConfigured)?;

        let expected = hex::decode(hash).map_err(|e| AccessError::MalformedHash(e.to_string()))?;
        if expected.len() != 32 {
            return Err(AccessError::MalformedHash(format!(
                "expected 32 bytes, got {}",
                expected.len()
            )));
        }

        Ok(Some(Self {
            salt: settings.salt.clone(),
            expected: Some(expected),
        }))
    }

    /// Hex HMAC-SHA256 of `password` keyed by `salt`.
    pub fn hash_password(salt: &str, password: &str) -> String {
        let mut mac = Self::mac(salt);
        mac.update(password.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a password.
    pub fn verify(&self, password: &str) -> Result<(), AccessError> {
        let expected = self.expected.as_deref().ok_or(AccessError::NotConfigured)?;

        let mut mac = Self::mac(&self.salt);
        mac.update(password.as_bytes());
        mac.verify_slice(expected).map_err(|_| AccessError::Denied)
    }

    fn mac(salt: &str) -> HmacSha256 {
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key size")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(password: &str) -> AuthSettings {
        AuthSettings {
            enabled: true,
            salt: "pepper".to_string(),
            password_hash: Some(AccessGate::hash_password("pepper", password)),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_right_password() {
        let gate = AccessGate::from_settings(&settings("hunter2")).unwrap().unwrap();
        assert!(gate.verify("hunter2").is_ok());
    }

    #[test]
    fn test_denies_wrong_password() {
        let gate = AccessGate::from_settings(&settings("hunter2")).unwrap().unwrap();
        assert!(matches!(gate.verify("hunter3"), Err(AccessError::Denied)));
        assert!(matches!(gate.verify(""), Err(AccessError::Denied)));
    }

    #[test]
    fn test_salt_changes_digest() {
        assert_ne!(
            AccessGate::hash_password("a", "secret"),
            AccessGate::hash_password("b", "secret")
        );
        assert_eq!(AccessGate::hash_password("a", "secret").len(), 64);
    }

    #[test]
    fn test_disabled_gate() {
        let settings = AuthSettings::default();
        assert!(AccessGate::from_settings(&settings).unwrap().is_none());
    }

    #[test]
    fn test_enabled_without_hash() {
        let settings = AuthSettings {
            enabled: true,
            ..Default::default()
        };
        assert!(matches!(
            AccessGate::from_settings(&settings),
            Err(AccessError::NotConfigured)
        ));
    }

    #[test]
    fn test_malformed_hash() {
        let mut bad = settings("x");
        bad.password_hash = Some("not-hex".to_string());
        assert!(matches!(
            AccessGate::from_settings(&bad),
            Err(AccessError::MalformedHash(_))
        ));

        bad.password_hash = Some("abcd".to_string());
        assert!(matches!(
            AccessGate::from_settings(&bad),
            Err(AccessError::MalformedHash(_))
        ));
    }
}

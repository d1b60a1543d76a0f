//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use scanner_engine::{
    format_value, CycleReport, EmaTrend, Signal, Snapshot, NO_DATA_NOTICE,
};
use std::io;
use std::time::Duration;

const WAITING_NOTICE: &str = "Waiting for first update...";

/// Dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Name greeted in the header
    pub trader: String,
    /// Data source name
    pub source: String,
    /// Number of watched tickers
    pub tickers: usize,
    /// Seconds between polling cycles
    pub period_secs: u64,
    /// Latest published report, `None` until the first cycle completes
    pub report: Option<CycleReport>,
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until the user presses `q` or `Esc`.
    pub fn run<F>(&self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(&self, terminal: &mut Terminal<B>, get_state: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> DashboardState,
    {
        loop {
            let state = get_state();
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let failures = state
            .report
            .as_ref()
            .map(|r| r.failures.len())
            .unwrap_or(0);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Snapshots
                Constraint::Length(3), // Status
                Constraint::Length(failures.clamp(1, 6) as u16 + 2), // Skipped tickers
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_snapshots(frame, chunks[1], state);
        self.render_status(frame, chunks[2], state);
        self.render_failures(frame, chunks[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Watchlist Scanner",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Welcome {}", state.trader),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" | "),
            Span::styled(&state.source, Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                " | {} tickers every {}s | Press 'q' to quit",
                state.tickers, state.period_secs
            )),
        ])])
        .block(Block::default().borders(Borders::ALL).title("Scanner"));
        frame.render_widget(header, area);
    }

    fn render_snapshots(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default().borders(Borders::ALL).title("Indicators");

        let report = match &state.report {
            Some(report) if !report.is_empty() => report,
            Some(_) => return render_notice(frame, area, block, NO_DATA_NOTICE),
            None => return render_notice(frame, area, block, WAITING_NOTICE),
        };

        let header_cells = ["Ticker", "Close", "RSI", "EMA20", "EMA50", "Signal"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = report.snapshots.iter().map(snapshot_row);

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .block(block);

        frame.render_widget(table, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let text = match &state.report {
            Some(report) => format!("Last update: {}", report.update_time()),
            None => "Last update: -".to_string(),
        };
        let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }

    fn render_failures(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let lines: Vec<Line> = state
            .report
            .iter()
            .flat_map(|r| r.failures.iter())
            .map(|f| {
                Line::from(vec![
                    Span::styled(f.symbol.as_str(), Style::default().fg(Color::Yellow)),
                    Span::raw(": "),
                    Span::raw(f.message.as_str()),
                ])
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Skipped"));
        frame.render_widget(paragraph, area);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, block: Block, notice: &str) {
    let paragraph = Paragraph::new(notice)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn snapshot_row(snap: &Snapshot) -> Row<'static> {
    Row::new(vec![
        Cell::from(snap.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format_value(snap.last_close)),
        Cell::from(format_value(snap.rsi)),
        Cell::from(format_value(snap.ema_fast)),
        Cell::from(format_value(snap.ema_slow)),
        Cell::from(snap.signal.to_string()).style(Style::default().fg(signal_color(&snap.signal))),
    ])
}

/// RSI extremes are yellow, otherwise the EMA trend picks green or red.
fn signal_color(signal: &Signal) -> Color {
    match (signal.momentum, signal.trend) {
        (Some(_), _) => Color::Yellow,
        (None, Some(EmaTrend::Bullish)) => Color::Green,
        (None, Some(EmaTrend::Bearish)) => Color::Red,
        (None, None) => Color::DarkGray,
    }
}

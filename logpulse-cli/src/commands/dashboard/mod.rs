//! `logpulse dashboard` command handler
//!
//! Full-screen terminal UI: a login gate, then the analysis summary, bar
//! charts for error codes, top IPs and request types, and the most recent
//! error events. 4xx/5xx toggles re-aggregate in place.

pub mod app;
mod events;
mod ui;

use std::io::{Stdout, stdout};
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::ExecutableCommand;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::{info, warn};

use logpulse_analyzer::{Analyzer, LogSource, StaticCredentials};
use logpulse_core::config::LogPulseConfig;

use crate::cli::DashboardArgs;
use crate::error::CliError;

use app::{Action, DashboardApp};
use events::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> std::io::Result<Tui> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

fn restore_terminal() -> std::io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Execute the `dashboard` command.
///
/// The terminal is restored before returning, also on error.
pub async fn execute(args: DashboardArgs, config: &LogPulseConfig) -> Result<(), CliError> {
    let analyzer = Analyzer::from_config(&config.analysis, &config.health)?;
    let verifier = StaticCredentials::from_config(&config.dashboard);
    let path = super::source_path(args.file.as_ref(), config);
    let tick_rate = Duration::from_millis(config.dashboard.tick_rate_ms);

    let mut app = DashboardApp::new(analyzer, Box::new(verifier), path);

    info!("dashboard starting");
    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, &mut app, tick_rate).await;
    if let Err(e) = restore_terminal() {
        warn!(error = %e, "failed to restore terminal");
    }
    info!("dashboard closed");

    result
}

async fn run_loop(
    terminal: &mut Tui,
    app: &mut DashboardApp,
    tick_rate: Duration,
) -> Result<(), CliError> {
    let mut events = EventHandler::new(tick_rate);

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            AppEvent::Key(key) => match app.handle_key(key) {
                Action::Quit => break,
                Action::Load(path) => {
                    let loaded = LogSource::load(&path).await;
                    app.apply_source(path, loaded);
                }
                Action::None => {}
            },
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }
    }

    Ok(())
}

//! Cupid CLI - Binary entry point and terminal session management.
//!
//! The CLI bridges [`cupid_engine`] (application state) and [`cupid_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed
//! cleanup.
//!
//! ```text
//! cupid [share-link | token]
//!   main() -> TerminalSession::new() -> run_app() -> App + TUI
//! ```
//!
//! Without an argument the card opens on the setup form. With a share link
//! (or a bare token) it opens straight on the question.

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cupid_engine::{App, AppSettings, CupidConfig, notifier_from_config};
use cupid_tui::{draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than draw over the card.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.cupid/logs/cupid.log
    if let Some(config_path) = CupidConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("cupid.log"));
    }

    candidates.push(PathBuf::from(".cupid").join("logs").join("cupid.log"));
    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode, bracketed paste, mouse capture and the alternate screen are all
/// restored on drop, including after early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(
            out,
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableMouseCapture
        ) {
            restore_terminal(&mut out);
            return Err(err.into());
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore_terminal(&mut stdout());
                Err(err.into())
            }
        }
    }
}

fn restore_terminal(out: &mut Stdout) {
    let _ = disable_raw_mode();
    let _ = execute!(
        out,
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    );
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

const FRAME_DURATION: Duration = Duration::from_millis(16);
const NOTIFY_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let shared = env::args().nth(1);

    let config = match CupidConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring unreadable config");
            CupidConfig::default()
        }
    };
    let settings = AppSettings::from_config(&config)?;

    let mut app = App::new(settings, shared.as_deref());
    if let Some(notifier) = notifier_from_config(&config) {
        app = app.with_notifier(notifier);
    }
    tracing::info!(step = ?app.step(), "Card opened");

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = &result {
        eprintln!("Error: {err:?}");
    }

    // Let an in-flight acceptance email finish before the runtime goes away.
    if app.notification_pending() {
        tracing::info!("Waiting for acceptance notification");
    }
    if let Some(task) = app.take_notification_task()
        && timeout(NOTIFY_GRACE, task).await.is_err()
    {
        tracing::warn!("Acceptance notification still pending at exit");
    }

    result
}

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut frames = interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;

        if handle_events(app, Duration::ZERO)? {
            return Ok(());
        }

        let elapsed = app.frame_elapsed();
        app.tick(elapsed);

        terminal.draw(|frame| draw(frame, app))?;
    }
}

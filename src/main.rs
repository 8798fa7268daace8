use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, process::Stdio, time::Duration};

use queueboard::utils::{init_tracing, log_file_path, parse_reference_time, LogTarget};
use queueboard::{
    ui, update, App, Command, Dashboard, DashboardConfig, DashboardReport, Message, Reloader,
    Snapshot, SnapshotPaths,
};

/// Review-status dashboard over a snapshot of open pull requests
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Per-PR details (size and comment counts), keyed by PR number
    pr_info: PathBuf,

    /// Snapshot of all non-draft open PRs
    nondraft: PathBuf,

    /// Snapshot of all draft PRs
    draft: PathBuf,

    /// Pre-queried board lists, recognised by file name (e.g. queue.json)
    boards: Vec<PathBuf>,

    /// Configuration file (default: ~/.config/queueboard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference time as RFC 3339 (default: now)
    #[arg(long, value_parser = parse_reference_time)]
    now: Option<DateTime<Utc>>,

    /// Print statistics, board sizes and diagnostics, then exit
    #[arg(long, conflicts_with = "json")]
    summary: bool,

    /// Print the full report as JSON, then exit
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = !cli.summary && !cli.json;
    let log_target = if interactive {
        LogTarget::File(log_file_path().unwrap_or_else(|| std::env::temp_dir().join("queueboard.log")))
    } else {
        LogTarget::Stderr
    };
    init_tracing(log_target)?;

    let config = DashboardConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let paths = SnapshotPaths {
        details: cli.pr_info,
        nondraft: cli.nondraft,
        draft: cli.draft,
        boards: cli.boards,
    };
    let pinned_now = cli.now;

    let snapshot = Snapshot::load(&paths).context("reading snapshot")?;
    let report = DashboardReport::build(&snapshot, pinned_now.unwrap_or_else(Utc::now), &config);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if cli.summary {
        print!("{}", report.summary());
        return Ok(());
    }

    let reloader = {
        let config = config.clone();
        Reloader::spawn(move || {
            let snapshot = Snapshot::load(&paths).context("reading snapshot")?;
            Ok(DashboardReport::build(
                &snapshot,
                pinned_now.unwrap_or_else(Utc::now),
                &config,
            ))
        })
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(report, config);

    let res = run_app(&mut terminal, &mut app, &reloader);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    reloader: &Reloader,
) -> Result<()> {
    loop {
        // Check for background reload results
        if let Some(result) = reloader.try_result() {
            if let Some(cmd) = update(app, Message::ReloadComplete(result)) {
                if handle_command(app, cmd, reloader) {
                    return Ok(());
                }
            }
        }

        // Update spinner
        if let Some(cmd) = update(app, Message::Tick) {
            if handle_command(app, cmd, reloader) {
                return Ok(());
            }
        }

        // Draw UI
        terminal.draw(|f| ui(f, app))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = key_to_message(app, key.code, key.modifiers) {
                        if let Some(cmd) = update(app, msg) {
                            if handle_command(app, cmd, reloader) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Handle a command returned from update. Returns true to quit.
fn handle_command(app: &mut App, cmd: Command, reloader: &Reloader) -> bool {
    match cmd {
        Command::Quit => true,
        Command::Reload => {
            reloader.request();
            false
        }
        Command::OpenUrl(url) => {
            if let Err(e) = open_url(&url) {
                tracing::warn!("could not open {url}: {e}");
                update(app, Message::ShowUrl(url));
            }
            false
        }
    }
}

fn open_url(url: &str) -> io::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    std::process::Command::new(opener)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

/// Convert a key press to a message based on current app state
fn key_to_message(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    // Error popup
    if app.show_error_popup {
        return match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissError),
            _ => None,
        };
    }

    // URL popup (shown when no browser could be started)
    if app.show_url_popup.is_some() {
        return match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissPopup),
            _ => None,
        };
    }

    // Informational popups - any key dismisses
    if app.show_help_popup
        || app.show_statistics_popup
        || app.show_diagnostics_popup
        || app.show_checklist_popup
    {
        return Some(Message::DismissPopup);
    }

    // Search mode
    if app.search_mode {
        return match key {
            KeyCode::Esc => Some(Message::ExitSearchMode { clear: true }),
            KeyCode::Enter => Some(Message::ExitSearchMode { clear: false }),
            KeyCode::Backspace => Some(Message::SearchBackspace),
            KeyCode::Char(c) => Some(Message::SearchInput(c)),
            KeyCode::Down => Some(Message::NextItem),
            KeyCode::Up => Some(Message::PreviousItem),
            _ => None,
        };
    }

    // Normal mode
    match key {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('/') => Some(Message::EnterSearchMode),
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                Some(Message::ExitSearchMode { clear: true })
            } else {
                None
            }
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Message::NextItem),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviousItem),
        KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::Char('G') => Some(Message::GoToBottom),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Message::NextTab),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Message::PreviousTab),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c.to_digit(10).map_or(0, |d| d as usize - 1);
            Dashboard::ALL.get(idx).copied().map(Message::SwitchTab)
        }
        KeyCode::Char('o') | KeyCode::Enter => Some(Message::OpenSelected),
        KeyCode::Char('c') => Some(Message::ToggleChecklist),
        KeyCode::Char('s') => Some(Message::ToggleStatistics),
        KeyCode::Char('d') => Some(Message::ToggleDiagnostics),
        KeyCode::Char('r') => Some(Message::Reload),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}

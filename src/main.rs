use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use smooth_snake::app::{App, Flow};
use smooth_snake::difficulty::PresetTable;
use smooth_snake::input::map_key;
use smooth_snake::renderer;
use smooth_snake::session::GameSession;
use smooth_snake::terminal_runtime::{install_panic_hook, AppTerminal, TerminalSession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Longest the loop waits for input when no timer is armed.
const IDLE_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Start straight away with this difficulty preset (e.g. `hard`).
    #[arg(long)]
    difficulty: Option<String>,

    /// JSON file replacing the built-in difficulty presets.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filtered by `RUST_LOG`, default `info`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        if let Err(error) = init_tracing(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let Some(presets) = load_presets(cli.presets.as_deref()) else {
        return ExitCode::FAILURE;
    };

    if let Some(key) = cli.difficulty.as_deref() {
        if presets.get(key).is_none() {
            let known: Vec<&str> = presets.iter().map(|preset| preset.key.as_str()).collect();
            eprintln!("Unknown difficulty `{key}`; expected one of: {}", known.join(", "));
            return ExitCode::FAILURE;
        }
    }

    install_panic_hook();

    match run(&cli, presets) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Terminal error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, presets: PresetTable) -> io::Result<()> {
    let epoch = Instant::now();
    let session = GameSession::with_options(presets, smooth_snake::config::DEFAULT_GRID, cli.seed);
    let mut app = App::new(session, epoch);

    if let Some(key) = cli.difficulty.as_deref() {
        app.start_with(key, epoch)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    }

    let mut runtime = TerminalSession::enter()?;
    let result = event_loop(runtime.terminal_mut(), &mut app);
    info!(score = app.session.discrete_state().score, "exiting");
    result
}

fn event_loop(terminal: &mut AppTerminal, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| renderer::render(frame, app))?;

        let wait = app
            .session
            .time_until_next(Instant::now())
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

        if event::poll(wait)? {
            // Key presses are queued as soon as they arrive, ahead of any due tick.
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    if app.handle_input(input, Instant::now()) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }

        app.update(Instant::now());
    }
}

fn load_presets(path: Option<&Path>) -> Option<PresetTable> {
    let loaded = match path {
        Some(path) => PresetTable::load(path),
        None => PresetTable::load_user_or_builtin(),
    };

    match loaded {
        Ok(presets) => Some(presets),
        Err(error) if path.is_some() => {
            eprintln!("Failed to load presets: {error}");
            None
        }
        Err(error) => {
            eprintln!("Warning: ignoring preset file: {error}");
            warn!(%error, "using built-in presets");
            Some(PresetTable::builtin())
        }
    }
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

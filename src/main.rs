use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use folio::app::{draw, App};
use folio::config::{self, Config};
use folio::console::{overlay, Interpreter, ProcessPlayer};
use folio::logging;

// ============================================================================
// MAIN
// ============================================================================

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A terminal portfolio with a PS2-style loading ring and a hidden terminal", long_about = None)]
struct Cli {
    /// Generate default configuration file
    #[arg(short, long)]
    init: bool,

    /// Specify custom config file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for coin flips, fortunes and loading progress
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs here instead of the cache directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle --init flag
    if cli.init {
        return generate_config_file(cli.config);
    }

    if let Some(log_path) = cli.log_file.clone().or_else(logging::default_log_path) {
        if let Err(e) = logging::init_logging(cli.verbose, &log_path) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        config::load_config_from_path(config_path).with_context(|| {
            format!("Failed to load config file: {}", config_path.display())
        })?
    } else {
        config::load_config()
    };

    let mut app = build_app(config, cli.seed);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn build_app(config: Config, seed: Option<u64>) -> App {
    let (console_rng, loader_rng) = match seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let frames = overlay::load_frames(config.console.dance_frames.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read dance frames, using built-in");
        overlay::builtin_frames()
    });

    let console = Interpreter::new(
        &config.profile,
        Interpreter::overlay_from_config(&config.console, frames),
        Box::new(ProcessPlayer::from_config(&config.console.audio)),
        console_rng,
    );

    App::new(config, console, loader_rng)
}

fn generate_config_file(path: Option<PathBuf>) -> Result<()> {
    let config_path = match path {
        Some(path) => path,
        None => config::get_config_path().context("Could not determine config directory")?,
    };

    config::write_default_config(&config_path)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!(
        "Default configuration file created at: {}",
        config_path.display()
    );
    println!("Edit this file to customize folio's appearance and behavior.");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let frame_interval = Duration::from_millis(app.config().loader.frame_interval_ms);
    let mut last_frame = Instant::now();
    let mut screen = Rect::default();

    loop {
        let now = Instant::now();
        app.update(now.duration_since(last_frame));
        last_frame = now;

        terminal.draw(|f| {
            screen = f.area();
            draw(f, app);
        })?;

        if app.should_quit() {
            break;
        }

        if event::poll(frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, screen),
                _ => {}
            }
        }
    }
    Ok(())
}

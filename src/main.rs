//! ellip - watch multi-line truncation converge in the terminal.

mod app;
mod keys;
mod surface;
mod text;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Builder, Env, Target};

use app::App;
use ellipsize::{Direction, EllipsisConfig, EllipsisError, Width};
use surface::{MIN_COLUMNS, TerminalSurface};

/// How long to wait for input when no settle timer is armed.
const IDLE_POLL: Duration = Duration::from_millis(250);

const SAMPLE_CONTENT: &str = "Multi-line truncation guesses its cut points from \
coarse character widths, then measures the rendered result and trims one \
character at a time until the text fits the row budget. 中文字符也会参与估算。";

/// Multi-line text truncation that converges on a real rendered height.
#[derive(Parser, Debug)]
#[command(name = "ellip", version, about)]
struct Args {
    /// Text to truncate.
    #[arg(short, long, conflicts_with = "file")]
    content: Option<String>,

    /// Read the text to truncate from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Where the text is cut: start, end or middle.
    #[arg(short, long, default_value = "end")]
    direction: Direction,

    /// Row budget; accepts values like `2` or `2px`.
    #[arg(short, long, default_value = "1")]
    rows: String,

    /// Box width in terminal columns.
    #[arg(short, long, default_value = "40")]
    width: usize,

    /// Truncation symbol.
    #[arg(long, default_value = "...")]
    symbol: String,

    /// Expand label; no expand or collapse affordance when empty.
    #[arg(long, default_value = "more")]
    expand_text: String,

    /// Collapse label.
    #[arg(long, default_value = "less")]
    collapse_text: String,

    /// Pixels per terminal row.
    #[arg(long, default_value = "20")]
    line_height: String,

    /// Font size reported to the width estimator.
    #[arg(long, default_value = "14")]
    font_size: f64,

    /// Pixels per terminal column.
    #[arg(long, default_value = "8")]
    cell_width: f64,

    /// Delay before each verification round, in milliseconds.
    #[arg(long, default_value = "100")]
    settle_ms: u64,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let content = match (&args.content, &args.file) {
        (Some(content), _) => content.clone(),
        (None, Some(path)) => app::read_content(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => SAMPLE_CONTENT.to_string(),
    };

    let config = EllipsisConfig::default()
        .with_direction(args.direction)
        .with_rows_str(&args.rows)
        .with_expand_text(args.expand_text)
        .with_collapse_text(args.collapse_text)
        .with_symbol(args.symbol)
        .with_line_height_str(&args.line_height)
        .with_settle_delay(Duration::from_millis(args.settle_ms));

    let surface = TerminalSurface::new(
        args.width,
        args.cell_width,
        config.line_height,
        args.font_size,
    );
    let config = config.with_width(Width::Px(surface.width_px()));

    let app = App::new(content, config, surface);

    // Run TUI
    run_tui(app)
}

/// Send log output to `path`; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("ellipsize=debug,ellip=debug"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")
}

/// Run the TUI application.
fn run_tui(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();

    let result = run_event_loop(&mut terminal, &mut app);

    ratatui::restore();

    result
}

/// Main event loop.
fn run_event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    let size = terminal.size().context("failed to query terminal size")?;
    if (size.width as usize) < MIN_COLUMNS + 2 || size.height < 8 {
        return Err(EllipsisError::AreaTooSmall.into());
    }

    loop {
        // Answer measurements and arm timers before drawing
        app.pump(Instant::now());

        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Wake for the settle timer even without input
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            let event = event::read()?;
            if let Event::Key(key) = &event
                && key.kind == KeyEventKind::Press
                && keys::dispatch_key_event(app, *key, &event)
            {
                continue;
            }
        }

        app.fire_due(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

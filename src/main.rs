mod app;
mod color;
mod config;
mod input;
mod palette;
mod picker;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use color::Color;
use palette::{ColorStore, PaletteModel, Section};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use storage::{KeyValueStore, MemoryStore, Storage};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fill-light", version, about = "Full-screen fill light with a color palette")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Keep the palette in memory only; nothing is read from or written to disk.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print the palette to stdout (headless).
    List,
    /// Add a custom color, e.g. `#FF8800` (headless).
    Add { color: String },
    /// Select the color at a palette index (headless).
    Select { index: usize },
    /// Delete the custom color at a palette index (headless).
    Delete { index: usize },
    /// Move a system color to another system slot (headless).
    Move { from: usize, to: usize },
    /// Dump the stored palette as JSON (headless).
    Export,
    /// Restore the default palette (headless).
    Reset {
        /// Delete the stored record instead of overwriting it.
        #[arg(long)]
        purge: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui);
    let tui_mode = matches!(command, Command::Tui);

    init_logging(&cfg, tui_mode).context("init logging")?;

    let storage: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Storage::open(&cfg.database_path()).context("open palette storage")?)
    };

    if tui_mode {
        let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
        let mut app = app::App::new(cfg, storage);
        return app.run(terminal.terminal_mut()).await;
    }

    let mut store = ColorStore::load(storage);
    match command {
        Command::Tui | Command::List => {}
        Command::Add { color } => {
            let color = Color::parse(&color).with_context(|| format!("parse color {color:?}"))?;
            if store.add_custom(color.clone()) {
                println!("Added {color}.");
            } else {
                println!("{color} is already in the palette.");
            }
        }
        Command::Select { index } => {
            if !store.select(index) {
                anyhow::bail!("no color at index {index}");
            }
        }
        Command::Delete { index } => {
            if !palette::model::delete_item(&mut store, index) {
                anyhow::bail!("index {index} is not a custom color");
            }
        }
        Command::Move { from, to } => {
            if !palette::model::move_item(&mut store, from, to) {
                anyhow::bail!("cannot move {from} to {to}: both must be system colors");
            }
        }
        Command::Export => {
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
            return Ok(());
        }
        Command::Reset { purge: false } => store.reset(),
        Command::Reset { purge: true } => store.forget().context("remove stored palette")?,
    }

    if let Some(err) = store.take_persist_error() {
        anyhow::bail!("save palette: {err}");
    }
    print_palette(&store);
    Ok(())
}

/// The TUI owns the terminal, so logs go to a file there; headless
/// commands log to stderr.
fn init_logging(cfg: &config::Config, tui_mode: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.level))
        .context("parse log filter")?;

    if tui_mode {
        let path = cfg.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn print_palette(store: &ColorStore) {
    for item in PaletteModel::new(store).items() {
        let section = match item.section {
            Section::System => "system",
            Section::Custom => "custom",
        };
        let marker = if item.selected { "*" } else { " " };
        println!("{marker} {:02}. {}  ({section})", item.index, item.color);
    }
}

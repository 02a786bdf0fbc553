mod app;
mod clipboard;
mod color;
mod config;
mod export;
mod input;
mod library;
mod palette;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use color::ColorFormat;
use export::ExportFormat;
use library::{Library, LibraryFilter};
use palette::{analyze, PaletteEngine, PaletteSessionState};
use storage::Storage;

#[derive(Debug, Parser)]
#[command(name = "hues", version, about = "Accessible color palette generator")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print random colors without touching the saved session.
    Generate {
        #[arg(
            long,
            default_value_t = config::defaults::PALETTE_SIZE,
            value_parser = palette::parse_count
        )]
        count: usize,
        #[arg(long, default_value = "hex")]
        format: ColorFormat,
    },
    /// Print the current palette with its contrast report.
    Show,
    /// Replace every unpinned color.
    Regenerate,
    /// Toggle the pin on a color (1-based).
    Pin { index: usize },
    /// Change the number of colors (3, 5 or 7).
    Resize {
        #[arg(value_parser = palette::parse_size)]
        size: usize,
    },
    /// Switch the palette encoding.
    Format { format: ColorFormat },
    /// Print the palette as a CSS, SCSS or Tailwind snippet.
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
    },
    /// Saved palettes.
    Library {
        #[command(subcommand)]
        cmd: LibraryCommand,
    },
}

#[derive(Debug, Subcommand)]
enum LibraryCommand {
    /// List saved palettes, newest first.
    List {
        /// Case-insensitive name search.
        #[arg(long)]
        query: Option<String>,
        /// Exact tag match.
        #[arg(long)]
        tag: Option<String>,
        /// Only favorites.
        #[arg(long)]
        favorites: bool,
    },
    /// Save the pinned colors of the current palette.
    Save,
    Rename { id: String, name: String },
    /// Replace tags with a comma separated list.
    Tag { id: String, tags: String },
    /// Toggle favorite.
    Fav { id: String },
    Delete { id: String },
    /// Load a saved palette into the generator.
    Apply { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    let command = cli.command.unwrap_or(Command::Tui);
    init_logging(&cfg, matches!(command, Command::Tui))?;

    match command {
        Command::Tui => {
            let mut app = app::App::new(cfg, cfg_path)?;
            let mut terminal = tui::TerminalGuard::enter().context("init terminal")?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Generate { count, format } => {
            for value in color::generator::generate(count, format) {
                println!("{value}");
            }
        }
        Command::Show => {
            let (_, engine) = open_palette(&cfg)?;
            print_palette(engine.state());
        }
        Command::Regenerate => {
            let (storage, mut engine) = open_palette(&cfg)?;
            engine.regenerate(&storage)?;
            print_palette(engine.state());
        }
        Command::Pin { index } => {
            let (storage, mut engine) = open_palette(&cfg)?;
            let len = engine.state().slots.len();
            if index == 0 || index > len {
                anyhow::bail!("no color at position {index} (palette has {len})");
            }
            engine.toggle_pin(&storage, index - 1)?;
            print_palette(engine.state());
        }
        Command::Resize { size } => {
            let (storage, mut engine) = open_palette(&cfg)?;
            engine.resize(&storage, size)?;
            print_palette(engine.state());
        }
        Command::Format { format } => {
            let (storage, mut engine) = open_palette(&cfg)?;
            engine.change_format(&storage, format)?;
            print_palette(engine.state());
        }
        Command::Export { format } => {
            let (_, engine) = open_palette(&cfg)?;
            print!("{}", export::render(format, &engine.state().slots));
        }
        Command::Library { cmd } => run_library(&cfg, cmd)?,
    }

    Ok(())
}

fn init_logging(cfg: &config::Config, to_file: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level());

    if to_file {
        // The TUI owns the terminal, so logs go to a file.
        let path = cfg.log_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn open_storage(cfg: &config::Config) -> anyhow::Result<Storage> {
    Storage::open(&cfg.db_path()).context("open storage")
}

fn open_palette(cfg: &config::Config) -> anyhow::Result<(Storage, PaletteEngine)> {
    let storage = open_storage(cfg)?;
    let engine = PaletteEngine::initialize(&storage, cfg.palette.size, cfg.palette.format)?;
    Ok((storage, engine))
}

fn run_library(cfg: &config::Config, cmd: LibraryCommand) -> anyhow::Result<()> {
    let storage = open_storage(cfg)?;
    let mut library = Library::load(&storage)?;

    let resolve = |library: &Library, id: &str| -> anyhow::Result<String> {
        library
            .resolve_id(id)
            .map(str::to_string)
            .with_context(|| format!("no unique saved palette matches {id:?}"))
    };

    match cmd {
        LibraryCommand::List {
            query,
            tag,
            favorites,
        } => {
            let filter = LibraryFilter {
                query,
                tag,
                favorites_only: favorites,
            };
            let entries = library.list(&filter);
            if library.is_empty() {
                println!("(no saved palettes)");
            } else if entries.is_empty() {
                println!("(no palettes match)");
            }
            for entry in entries {
                println!(
                    "{}  {} {}  [{}]  {}",
                    entry.id.get(..8).unwrap_or(&entry.id),
                    if entry.favorite { "*" } else { " " },
                    entry.name,
                    entry.tags.join(", "),
                    entry
                        .colors
                        .iter()
                        .map(|c| format!("#{c}"))
                        .collect::<Vec<_>>()
                        .join(" "),
                );
            }
        }
        LibraryCommand::Save => {
            let engine = PaletteEngine::initialize(&storage, cfg.palette.size, cfg.palette.format)?;
            let colors = engine.state().pinned_hex();
            match library.create(&storage, colors)? {
                Some(entry) => println!("saved {} ({})", entry.name, entry.id),
                None => anyhow::bail!("no pinned colors to save; pin some with `hues pin <index>`"),
            }
        }
        LibraryCommand::Rename { id, name } => {
            let id = resolve(&library, &id)?;
            library.update(&storage, &id, Some(&name), None)?;
            println!("renamed {id}");
        }
        LibraryCommand::Tag { id, tags } => {
            let id = resolve(&library, &id)?;
            library.update(&storage, &id, None, Some(&tags))?;
            println!("retagged {id}");
        }
        LibraryCommand::Fav { id } => {
            let id = resolve(&library, &id)?;
            library.toggle_favorite(&storage, &id)?;
            let favorite = library.find(&id).is_some_and(|e| e.favorite);
            println!("{id} {}", if favorite { "favorited" } else { "unfavorited" });
        }
        LibraryCommand::Delete { id } => {
            let id = resolve(&library, &id)?;
            library.delete(&storage, &id)?;
            println!("deleted {id}");
        }
        LibraryCommand::Apply { id } => {
            let id = resolve(&library, &id)?;
            library.apply_to_generator(&storage, &id)?;
            let engine = PaletteEngine::initialize(&storage, cfg.palette.size, cfg.palette.format)?;
            print_palette(engine.state());
        }
    }
    Ok(())
}

fn print_palette(state: &PaletteSessionState) {
    println!(
        "size {}  format {}  dark preview {}",
        state.size,
        state.format.label(),
        if state.dark_preview_enabled { "on" } else { "off" }
    );

    let report = analyze::analyze(&state.slots);
    for (i, slot) in state.slots.iter().enumerate() {
        let pin = if slot.is_pinned { "*" } else { " " };
        let contrast = color::to_hex(&slot.value)
            .and_then(|hex| report.iter().find(|a| a.hex == hex))
            .map(|a| {
                format!(
                    "white {:>5.2}:1 {:<4}  black {:>5.2}:1 {:<4}",
                    a.white_ratio,
                    a.white_level.label(),
                    a.black_ratio,
                    a.black_level.label()
                )
            })
            .unwrap_or_default();
        println!("{:>2} {pin} {:<20} {contrast}", i + 1, slot.value);
    }

    if let Some(accent) = analyze::suggest_accent(&state.slots) {
        println!(
            "accent: #{} (color {}, {:.2}:1 against color {})",
            accent.value,
            accent.index + 1,
            accent.ratio,
            state.slots.len() / 2 + 1
        );
    }
}

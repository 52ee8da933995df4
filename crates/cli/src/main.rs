//! Command-line front-end for the cache engine.
//!
//! Owns no business logic: every subcommand loads the settings, builds
//! a [`ModCache`], rescans, invokes one engine entry point and renders
//! the result. The interactive prompts (import conflicts, delete
//! confirmation) live here — the engine itself never asks questions.

use clap::{Parser, Subcommand, ValueEnum};
use modcache_config::Settings;
use modcache_library::{
    AlwaysOverwrite, AlwaysSkip, BatchReport, CacheEntry, ConflictChoice, ConflictResolver, Inventory, ModCache,
    SortField, format_size,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Append-only log file receiving a copy of everything worth keeping.
const LOG_FILE: &str = "modcache.log";

#[derive(Parser)]
#[command(name = "modcache", version, about = "Manage a local cache of mod archives")]
struct Cli {
    /// Settings file to use instead of the per-user default.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the cached archives.
    List {
        /// Only show entries matching this text (name, version or file name).
        #[arg(long)]
        search: Option<String>,
        /// Sort the listing by this column.
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
    /// Copy archive files into the cache.
    Import {
        /// Archive files to copy in.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Overwrite existing files instead of prompting.
        #[arg(long, conflicts_with = "skip")]
        overwrite: bool,
        /// Skip existing files instead of prompting.
        #[arg(long)]
        skip: bool,
    },
    /// Copy cached archives out to a directory.
    Export {
        /// Entries to export, by display name or file name.
        #[arg(required = true)]
        names: Vec<String>,
        /// Directory receiving the copies.
        #[arg(long, value_name = "DIR")]
        dest: PathBuf,
    },
    /// Bundle cached archives into a single zip file.
    Bundle {
        /// Entries to bundle, by display name or file name.
        #[arg(required = true)]
        names: Vec<String>,
        /// Path of the zip file to create.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Delete cached archives. Irreversible.
    Delete {
        /// Entries to delete, by display name or file name.
        #[arg(required = true)]
        names: Vec<String>,
        /// Don't ask for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Show or change the stored settings.
    Config {
        /// New cache directory.
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
        /// New size budget in megabytes (0 disables the check).
        #[arg(long, value_name = "MB")]
        max_cache_size: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Name,
    Version,
    Size,
}

impl From<SortKey> for SortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortField::Name,
            SortKey::Version => SortField::Version,
            SortKey::Size => SortField::Size,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Console output on stderr, with a persistent copy appended to
/// [`LOG_FILE`] when it can be opened.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer =
        tracing_subscriber::fmt::layer().with_target(false).without_time().compact().with_writer(io::stderr);
    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);
    match std::fs::OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            registry.with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Arc::new(file))).init();
        },
        Err(_) => registry.init(),
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config_path = cli.config.unwrap_or_else(modcache_config::default_config_path);
    let settings = modcache_config::load(&config_path).map_err(|e| e.to_string())?;
    match cli.command {
        Command::Config { cache_dir, max_cache_size } => configure(&config_path, settings, cache_dir, max_cache_size),
        command => {
            let mut engine = ModCache::new(settings);
            dispatch(&mut engine, command)
        },
    }
}

fn dispatch(engine: &mut ModCache, command: Command) -> Result<(), String> {
    engine.rescan().map_err(|e| e.to_string())?;
    match command {
        Command::List { search, sort } => {
            let mut listing = match &search {
                Some(text) => engine.search(text),
                None => engine.inventory().clone(),
            };
            if let Some(key) = sort {
                listing.sort_by(key.into());
            }
            print_listing(&listing);
            if search.is_some() {
                println!("{} matching archive(s)", listing.len());
            }
            summary(engine);
        },
        Command::Import { files, overwrite, skip } => {
            let report = if overwrite {
                engine.import(&files, &mut AlwaysOverwrite)
            } else if skip {
                engine.import(&files, &mut AlwaysSkip)
            } else {
                engine.import(&files, &mut PromptResolver)
            }
            .map_err(|e| e.to_string())?;
            engine.rescan().map_err(|e| e.to_string())?;
            print_report("imported", &report);
            summary(engine);
        },
        Command::Export { names, dest } => {
            let selection = select(engine.inventory(), &names)?;
            let report = engine.export(&selection, &dest).map_err(|e| e.to_string())?;
            print_report("exported", &report);
        },
        Command::Bundle { names, output } => {
            let selection = select(engine.inventory(), &names)?;
            engine.bundle(&selection, &output).map_err(|e| e.to_string())?;
            println!("bundled {} archive(s) into {}", selection.len(), output.display());
        },
        Command::Delete { names, yes } => {
            let selection = select(engine.inventory(), &names)?;
            if !yes && !confirm_delete(&selection)? {
                println!("aborted");
                return Ok(());
            }
            let report = engine.delete(&selection);
            engine.rescan().map_err(|e| e.to_string())?;
            print_report("deleted", &report);
            summary(engine);
        },
        Command::Config { .. } => unreachable!("handled before dispatch"),
    }
    Ok(())
}

/// Resolves the selection against the current inventory; any name that
/// matches nothing fails the whole command before files are touched.
fn select(inventory: &Inventory, names: &[String]) -> Result<Vec<CacheEntry>, String> {
    let mut selection = Vec::new();
    for name in names {
        let hit = inventory
            .iter()
            .find(|entry| entry.display_name.eq_ignore_ascii_case(name) || entry.file_name().eq_ignore_ascii_case(name));
        match hit {
            Some(entry) => selection.push(entry.clone()),
            None => return Err(format!("no cached archive named `{name}`")),
        }
    }
    Ok(selection)
}

/// Asks on stdin, standing in for the original tool's conflict dialog.
struct PromptResolver;

impl ConflictResolver for PromptResolver {
    fn resolve(&mut self, _incoming: &Path, existing: &Path) -> ConflictChoice {
        loop {
            print!("`{}` already exists. [o]verwrite / [s]kip / [c]ancel all: ", existing.display());
            let _ = io::stdout().flush();
            let mut answer = String::new();
            match io::stdin().read_line(&mut answer) {
                // EOF or a broken pipe means nobody is answering.
                Ok(0) | Err(_) => return ConflictChoice::CancelAll,
                Ok(_) => {},
            }
            match answer.trim().to_lowercase().as_str() {
                "o" | "overwrite" => return ConflictChoice::Overwrite,
                "s" | "skip" => return ConflictChoice::Skip,
                "c" | "cancel" => return ConflictChoice::CancelAll,
                _ => println!("please answer o, s or c"),
            }
        }
    }
}

fn confirm_delete(selection: &[CacheEntry]) -> Result<bool, String> {
    let total: u64 = selection.iter().map(|entry| entry.size).sum();
    print!(
        "Delete {} archive(s), {} total? This cannot be undone. [y/N]: ",
        selection.len(),
        format_size(total)
    );
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(|e| e.to_string())?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_listing(listing: &Inventory) {
    for entry in listing {
        let version = entry.version.as_ref().map(|v| v.as_str()).unwrap_or("unknown");
        println!(
            "{:<32} {:<16} {:>12}  {}",
            entry.display_name,
            version,
            format_size(entry.size),
            entry.path.display()
        );
    }
}

fn print_report(verb: &str, report: &BatchReport) {
    if !report.succeeded.is_empty() {
        println!("{verb} {} archive(s)", report.succeeded.len());
    }
    for path in &report.skipped {
        println!("skipped {}", path.display());
    }
    for (path, reason) in &report.failed {
        eprintln!("failed {}: {reason}", path.display());
    }
    if report.cancelled {
        println!("cancelled; remaining items were not attempted");
    }
}

fn summary(engine: &ModCache) {
    println!("{} archive(s), cache size {}", engine.inventory().len(), format_size(engine.total_size()));
    if engine.over_budget() {
        println!(
            "warning: cache size ({}) exceeds the {} MB budget",
            format_size(engine.total_size()),
            engine.settings().max_cache_size
        );
    }
}

fn configure(
    path: &Path,
    mut settings: Settings,
    cache_dir: Option<PathBuf>,
    max_cache_size: Option<u64>,
) -> Result<(), String> {
    let changed = cache_dir.is_some() || max_cache_size.is_some();
    if let Some(dir) = cache_dir {
        settings.cache_dir = dir;
    }
    if let Some(max) = max_cache_size {
        settings.max_cache_size = max;
    }
    if changed {
        modcache_config::save(path, &settings).map_err(|e| e.to_string())?;
    }
    println!("settings file: {}", path.display());
    println!("cache_dir = {}", settings.cache_dir.display());
    if settings.max_cache_size == 0 {
        println!("max_cache_size = 0 (unlimited)");
    } else {
        println!("max_cache_size = {} MB", settings.max_cache_size);
    }
    Ok(())
}

//! arXiv News Reader CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use newsreader::{
    config::load_interests,
    error::Result,
    models::Config,
    pipeline,
    services::{AnnouncementSource, FileSource, Interests, StdinSource},
    storage::{ArchiveStorage, LocalArchive, RecordStore},
};

/// newsreader - arXiv announcement digest reader
#[derive(Parser, Debug)]
#[command(
    name = "newsreader",
    version,
    about = "Sorts arXiv announcement digests by personal interest"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "newsreader.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse digests and write an HTML report
    Report {
        /// Digest files (reads stdin when none are given)
        files: Vec<PathBuf>,

        /// Report file name, strftime syntax (default: reader.outfile)
        #[arg(short, long)]
        output: Option<String>,

        /// Add a section for entries matching no interest
        #[arg(long)]
        include_remaining: bool,

        /// Don't open the report after writing it
        #[arg(long)]
        no_open: bool,
    },

    /// Parse digests and list the new entries
    Parse {
        /// Digest files (reads stdin when none are given)
        files: Vec<PathBuf>,
    },

    /// Validate configuration and interest lists
    Validate,

    /// Show archive info
    Info,

    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Initialize logging. Without `RUST_LOG`, the level is governed by the
/// global max level, set by [`apply_level`].
fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp_secs()
        .init();
    apply_level(verbose, "info");
}

/// Apply the configured log level unless overridden by `--verbose` or `RUST_LOG`.
fn apply_level(verbose: bool, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let filter = if verbose {
        LevelFilter::Debug
    } else {
        level.parse().unwrap_or(LevelFilter::Info)
    };
    log::set_max_level(filter);
}

fn source_for(files: Vec<PathBuf>) -> Box<dyn AnnouncementSource> {
    if files.is_empty() {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(files))
    }
}

fn archive_for(config: &Config) -> Option<LocalArchive> {
    config
        .archive
        .enabled
        .then(|| LocalArchive::new(&config.archive.path))
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    apply_level(cli.verbose, &config.logging.level);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Report {
            files,
            output,
            include_remaining,
            no_open,
        } => {
            if let Some(output) = output {
                config.reader.outfile = output;
            }
            config.reader.include_remaining |= include_remaining;
            config.reader.open_outfile &= !no_open;
            config.validate()?;

            let interests = load_interests(&config.interests)?;
            let source = source_for(files);
            let archive = archive_for(&config);
            let archive = archive.as_ref().map(|a| a as &dyn ArchiveStorage);

            match pipeline::run_report(&config, &interests, source.as_ref(), archive)? {
                Some(outcome) => {
                    log::info!(
                        "Reported {} of {} new entries to {}",
                        outcome.reported,
                        outcome.summary.new + outcome.summary.revisions,
                        outcome.path.display()
                    );
                }
                None => log::info!("Nothing to report."),
            }
        }

        Command::Parse { files } => {
            let content = source_for(files).fetch()?;
            let mut store = match archive_for(&config) {
                Some(archive) => archive.load()?,
                None => RecordStore::new(),
            };

            let outcome = pipeline::ingest(&content, &mut store);
            for record in &outcome.records {
                println!("{record}");
            }
            println!("{}", outcome.summary);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            let lists = load_interests(&config.interests)?;
            let (interests, skipped) = Interests::compile(&lists);
            for err in &skipped {
                log::error!("✗ {}", err);
            }
            log::info!(
                "✓ {} author masks, {} keywords, {} categories",
                interests.author_masks().len(),
                interests.keywords().len(),
                interests.categories().len()
            );
            for mask in interests.author_masks() {
                log::debug!("  {} => {}", mask.as_str(), mask.pattern());
            }

            if let Some(err) = skipped.into_iter().next() {
                return Err(err.into());
            }
            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Config file: {}", cli.config.display());
            match archive_for(&config) {
                Some(archive) => {
                    log::info!("Archive: {}", archive.path().display());
                    if archive.path().exists() {
                        let store = archive.load()?;
                        log::info!(
                            "{} articles, {} variants ({} revisions)",
                            store.len(),
                            store.variant_count(),
                            store.revision_count()
                        );
                        let latest = store
                            .iter()
                            .filter_map(|(_, variants)| variants.last())
                            .max();
                        if let Some(record) = latest {
                            log::info!("Latest entry: {}", record);
                        }
                    } else {
                        log::info!("No archive written yet.");
                    }
                }
                None => log::info!("Archive disabled."),
            }
        }

        Command::Init { force } => {
            if cli.config.exists() && !force {
                log::warn!(
                    "Config already exists at {}. Use --force to overwrite.",
                    cli.config.display()
                );
                return Ok(());
            }
            if let Some(parent) = cli.config.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&cli.config, Config::default().to_toml()?)?;
            log::info!("Wrote settings to config file {}", cli.config.display());
        }
    }

    Ok(())
}

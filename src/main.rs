use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use symscan::batch::scan_directory_with_progress;
use symscan::config::{load_config, Config, Strategy};
use symscan::fetch::HttpFetcher;
use symscan::page::{scan_page, PageManifest};
use symscan::report::{render_corpus, render_page, Format};
use symscan::source::{InventorySource, PatternSource, StructuralSource};
use symscan::SourceUnit;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "symscan")]
#[command(version)]
#[command(about = "Inventory JavaScript declarations: classes, methods, properties, functions, variables")]
struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Load settings from this JSON file (flags still win)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recursively scan a directory with the structural parser and print the corpus inventory
    Scan {
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Source extensions to scan, comma separated (default: js,mjs,cjs,jsx)
        #[arg(long, value_delimiter = ',')]
        ext: Option<Vec<String>>,

        /// Directory name to skip anywhere in the tree (repeatable)
        #[arg(long, value_name = "NAME")]
        exclude_dir: Vec<String>,

        /// Honour .gitignore/.ignore files and skip hidden entries
        #[arg(long)]
        respect_ignore: bool,
    },

    /// Analyse one page's scripts and global scope from a JSON manifest
    Page {
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print the inventory of a single file as JSON
    Inspect {
        #[arg(value_name = "FILE_PATH")]
        file: PathBuf,

        /// Use the lexical fallback instead of the parser
        #[arg(long)]
        pattern: bool,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("symscan={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn scan_spinner() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut cfg = match cli.config.as_ref() {
        Some(p) => load_config(p)?,
        None => Config::default(),
    };

    match cli.cmd {
        Command::Scan {
            root,
            format,
            ext,
            exclude_dir,
            respect_ignore,
        } => {
            if let Some(ext) = ext {
                cfg.scan.extensions = ext;
            }
            cfg.scan.exclude_dir_names.extend(exclude_dir);
            cfg.scan.respect_ignore_files |= respect_ignore;

            let spinner = scan_spinner();
            let result = scan_directory_with_progress(&root, &cfg.scan, &spinner);
            spinner.finish_and_clear();
            let corpus = result.with_context(|| format!("Cannot scan {}", root.display()))?;

            print!("{}", render_corpus(&corpus, format)?);
        }

        Command::Page {
            manifest,
            strategy,
            format,
        } => {
            let text = std::fs::read_to_string(&manifest)
                .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
            let page: PageManifest = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse manifest {}", manifest.display()))?;
            let strategy = strategy.unwrap_or(cfg.page.strategy);

            let scan = scan_page(&page, &HttpFetcher::new(), strategy);
            println!("{}", render_page(&scan, format)?);
        }

        Command::Inspect { file, pattern } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let unit = SourceUnit::file(&file);
            let source: Box<dyn InventorySource> = if pattern {
                Box::new(PatternSource::new(unit, text))
            } else {
                Box::new(StructuralSource::new(unit, text))
            };
            let inventory = source.collect()?;
            println!("{}", serde_json::to_string_pretty(&inventory)?);
        }
    }

    Ok(())
}

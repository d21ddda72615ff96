//! foodcheck: scan a food label and learn how healthy the product is.
//!
//! Terminal client for the FoodCheck OCR and scoring backend.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use foodcheck::{
    api::RatingKind,
    cli::{self, HistoryCommand, OutputOptions, RatingCommand, ScanCommand},
    config::{self, AppConfig, ConfigOverrides, Validatable},
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "foodcheck")]
#[command(version)]
#[command(about = "Узнай правду о продуктах: scan an ingredient label and get a health score", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Scan failed (recognition, no ingredients, scoring)
    3  Error occurred

EXAMPLES:
    # Interactive UI
    foodcheck

    # Scan a label photo and print the breakdown
    foodcheck scan label.jpg

    # Search history
    foodcheck history --search йогурт -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the backend functions; endpoints become `<base>/<function>`
    #[arg(long, global = true, env = "FOODCHECK_API_BASE")]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output arguments shared by the data commands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a photo of an ingredient label
    Scan {
        /// Image file to analyze
        image: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List previously scanned products
    History {
        /// Case-insensitive name filter applied locally
        #[arg(short, long)]
        search: Option<String>,

        /// Name filter passed to the backend
        #[arg(long)]
        remote_search: Option<String>,

        /// Maximum number of products to fetch
        #[arg(short, long)]
        limit: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the most harmful and most healthy ingredients
    Rating {
        /// Single leaderboard (default: harmful and healthy)
        #[arg(short, long, value_enum)]
        kind: Option<RatingKind>,

        /// Entries per leaderboard
        #[arg(short, long)]
        limit: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Interactive terminal UI (default)
    Tui {
        /// Prefill the scanner with this image path
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON schema of the configuration file
    ConfigSchema {
        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file + flags)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .foodcheck.yaml in the current directory
    Init,
}

impl Cli {
    /// Configuration file with global flags applied on top.
    fn effective_config(&self) -> (AppConfig, Option<PathBuf>) {
        let overrides = ConfigOverrides {
            api_base: self.api_base.clone(),
            timeout_secs: self.timeout,
        };
        AppConfig::from_file_with_overrides(self.config.as_deref(), &overrides)
    }

    fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui { .. }))
    }
}

impl OutputArgs {
    fn into_options(self, cli_no_color: bool, quiet: bool) -> OutputOptions {
        OutputOptions {
            format: self.output,
            file: self.output_file,
            no_color: cli_no_color,
            quiet,
        }
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so its logs go to a file in the cache dir.
fn init_logging(cli: &Cli) {
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
    );

    let log_file = cli.is_tui().then(open_log_file).flatten();
    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init(),
        None if cli.is_tui() => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = dirs::cache_dir()?.join("foodcheck");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("foodcheck.log"))
        .ok()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let (config, loaded_from) = cli.effective_config();
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let Cli {
        no_color,
        quiet,
        config: config_path,
        command,
        ..
    } = cli;
    let command = command.unwrap_or(Commands::Tui { image: None });

    // Commands that do not talk to the backend
    match command {
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "foodcheck", &mut io::stdout());
            return Ok(cli::exit_codes::SUCCESS);
        }
        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            return Ok(cli::exit_codes::SUCCESS);
        }
        Commands::Config { action } => {
            run_config(action, &config, loaded_from.as_deref(), config_path.as_deref())?;
            return Ok(cli::exit_codes::SUCCESS);
        }
        _ => {}
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("config: {e}");
        }
        anyhow::bail!("invalid configuration ({} problem(s))", errors.len());
    }
    let backend = cli::build_backend(&config)?;

    match command {
        Commands::Scan { image, output } => {
            let command = ScanCommand {
                image,
                output: output.into_options(no_color, quiet),
            };
            cli::run_scan(backend, &config, &command)
        }
        Commands::History {
            search,
            remote_search,
            limit,
            output,
        } => {
            let command = HistoryCommand {
                search,
                remote_search,
                limit,
                output: output.into_options(no_color, quiet),
            };
            cli::run_history(backend.as_ref(), &config, &command)
        }
        Commands::Rating {
            kind,
            limit,
            output,
        } => {
            let command = RatingCommand {
                kind,
                limit,
                output: output.into_options(no_color, quiet),
            };
            cli::run_rating(backend.as_ref(), &config, &command)
        }
        Commands::Tui { image } => cli::run_interactive(backend, &config, image),
        Commands::Completions { .. } | Commands::ConfigSchema { .. } | Commands::Config { .. } => {
            Ok(cli::exit_codes::SUCCESS)
        }
    }
}

fn run_config(
    action: ConfigAction,
    effective: &AppConfig,
    loaded_from: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(effective).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                config::file::user_config_dir().map(|p| p.display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in &[
                ".foodcheck.yaml",
                ".foodcheck.yml",
                "foodcheck.yaml",
                "foodcheck.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            if let Some(path) = config::default_config_path() {
                eprintln!("Per-user location: {}", path.display());
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".foodcheck.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}

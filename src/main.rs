//! docemit - member-area documentation writer
//!
//! Materializes the built-in documentation set under a base directory

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docemit::{commands, config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docemit")]
#[command(author, version, about = "Write the member-area documentation tree to disk")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "DOCEMIT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write all documents under the base directory
    Emit {
        /// Base directory (overrides the config file)
        #[arg(short, long, env = "DOCEMIT_BASE_DIR")]
        base_dir: Option<PathBuf>,

        /// Stop at the first failed file
        #[arg(long)]
        strict: bool,

        /// Only write documents whose path starts with this prefix (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in documents
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one rendered document
    Show {
        /// Document path, e.g. member/general/PROFILE.md
        path: String,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        operation: ConfigOperationCli,
    },
}

#[derive(Subcommand)]
enum ConfigOperationCli {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl From<ConfigOperationCli> for commands::ConfigOperation {
    fn from(op: ConfigOperationCli) -> Self {
        match op {
            ConfigOperationCli::Init { force } => commands::ConfigOperation::Init { force },
            ConfigOperationCli::Show => commands::ConfigOperation::Show,
        }
    }
}

fn output_format(json: bool) -> commands::OutputFormat {
    if json {
        commands::OutputFormat::Json
    } else {
        commands::OutputFormat::Summary
    }
}

/// Logs go to stderr so stdout only carries the report
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Emit {
            base_dir,
            strict,
            only,
            json,
        } => {
            let config = config::load_config(config_path)?;
            let options = commands::EmitOptions {
                base_dir,
                strict,
                only,
            };
            let report = commands::emit(&config, &options, output_format(json))?;
            if !report.is_clean() {
                std::process::exit(report.exit_code());
            }
        }
        Commands::List { json } => {
            commands::list(output_format(json))?;
        }
        Commands::Show { path } => {
            let config = config::load_config(config_path)?;
            commands::show(&config, &path)?;
        }
        Commands::Config { operation } => {
            commands::config_command(config_path, operation.into())?;
        }
    }

    Ok(())
}

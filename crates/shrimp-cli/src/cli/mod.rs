mod commands;
mod helpers;

use clap::Parser;
use shrimp_core::FootprintError;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const PROGRAM_NAME: &str = "shrimp-footprint";

pub fn run_from_env() -> i32 {
    match parse_and_dispatch(std::env::args().collect()) {
        Ok(code) => code,
        Err(error) => {
            let footprint_error = error.as_footprint_error();
            eprintln!("{}", footprint_error.diagnostic_line());
            footprint_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the default from warn.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .try_init();
}

#[derive(Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Greenhouse-gas footprint of a shrimp aquaculture cycle"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Estimate the footprint of a scenario JSON file
    Estimate(commands::EstimateArgs),
    /// List the loaded emission-factor table
    Factors(commands::FactorsArgs),
    /// Print an example scenario JSON
    Template,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Estimate(args) => commands::run_estimate_command(args),
        CliCommand::Factors(args) => commands::run_factors_command(args),
        CliCommand::Template => commands::run_template_command(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Estimate(FootprintError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_footprint_error(&self) -> FootprintError {
        match self {
            Self::Usage(message) => {
                FootprintError::invalid_input("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Estimate(error) => error.clone(),
            Self::Internal(error) => FootprintError::io("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<FootprintError> for CliError {
    fn from(error: FootprintError) -> Self {
        Self::Estimate(error)
    }
}

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use raise_error::annotations::error_annotation;
use raise_error::apply::executor::{execute_raise_error_task, StepExecutor};
use raise_error::apply::{load_steps_config, RaiseErrorTask};
use raise_error::config::{self, ActionInputs, ReporterConfig};
use raise_error::error::{ReportError, ReportedFailure, EXIT_FAILURE};
use raise_error::outputs::lazy_sink_from_env;

#[derive(Parser)]
#[command(name = "raise-error")]
#[command(about = "Report a CI step error as the ERROR_MESSAGE output or fail the run")]
#[command(version)]
struct Cli {
    /// Configuration directory (default: /etc/raise-error if exists, otherwise ~/.config/raise-error)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a single message using action inputs and flags
    Report {
        /// Message to report (default: INPUT_MESSAGE)
        #[arg(short, long)]
        message: Option<String>,
        /// Record the message as an output instead of failing (default: INPUT_OUTPUT-ERROR-MESSAGE)
        #[arg(
            long,
            value_parser = parse_bool_flag,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        output_error_message: Option<bool>,
    },
    /// Run the steps file from the configuration directory
    Apply {
        /// Keep outputs in memory instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_bool_flag(value: &str) -> Result<bool, String> {
    config::parse_boolean_input(config::OUTPUT_ERROR_MESSAGE_INPUT, value)
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // Logs go to stderr, stdout carries workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = config::resolve_config_dir(cli.config);

    let reporter_config = config::load_reporter_config(&config_dir).unwrap_or_else(|e| {
        warn!("Failed to load reporter config, using defaults: {:#}", e);
        ReporterConfig::default()
    });

    let result = match cli.command {
        Commands::Report {
            message,
            output_error_message,
        } => run_report(&reporter_config, message, output_error_message).await,
        Commands::Apply { dry_run } => run_apply(&reporter_config, &config_dir, dry_run).await,
    };

    if let Err(e) = result {
        fail(&e, reporter_config.annotate_failures);
    }
}

async fn run_report(
    reporter_config: &ReporterConfig,
    message: Option<String>,
    output_error_message: Option<bool>,
) -> anyhow::Result<()> {
    let inputs = ActionInputs::from_env()?.with_overrides(message, output_error_message);
    let mut sink = lazy_sink_from_env(reporter_config);

    let task = RaiseErrorTask {
        description: None,
        message: inputs.message,
        output_error_message: inputs.output_error_message,
    };

    execute_raise_error_task(&task, &mut sink)
        .await
        .map_err(ReportError::into_anyhow)?;

    info!("Error message recorded as step output");
    Ok(())
}

async fn run_apply(
    reporter_config: &ReporterConfig,
    config_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    info!("Running steps from: {}", config_dir.display());
    if dry_run {
        info!("Dry run mode - outputs will not be written");
    }

    let steps = load_steps_config(config_dir)?;
    let sink = lazy_sink_from_env(reporter_config);
    let mut executor = StepExecutor::new(dry_run, Box::new(sink));

    executor.validate(&steps)?;
    executor.execute(&steps).await
}

/// Surface the failure to the runner and exit
fn fail(err: &anyhow::Error, annotate: bool) -> ! {
    let message = match err.downcast_ref::<ReportedFailure>() {
        Some(failure) => failure.message.clone(),
        None => format!("{:#}", err),
    };

    error!("{}", message);
    if annotate {
        println!("{}", error_annotation(&message));
    }
    std::process::exit(EXIT_FAILURE);
}

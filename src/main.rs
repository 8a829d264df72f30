mod cli;
mod config;
mod logging;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use config::RunConfig;
use lifecycle::{CRITICAL_TARGET, LogReporter, Registry, RunSummary, walk};
use manifest::Manifest;
use ocikit::{Backend, OciCli};
use std::process::ExitCode;

const BANNER: &str = "*********** Commencing run *************";
const ABNORMAL_END: &str = "Run ended abnormally with exception:";

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    ExitCode::from(execute(&Cli::parse()))
}

/// Run the command line, returning the process exit status
fn execute(cli: &Cli) -> u8 {
    let Some(action) = cli.action.as_deref() else {
        return match Cli::command().print_help() {
            Ok(()) => EXIT_OK,
            Err(_) => EXIT_FAILURE,
        };
    };

    // Nothing can be logged until the sink is up; these go to stderr
    let config = match RunConfig::from_cli(cli, action) {
        Ok(config) => config,
        Err(e) => return fatal_before_logging(&anyhow::Error::new(e)),
    };
    if let Err(e) = logging::init(&config.log_file, config.level) {
        return fatal_before_logging(&e);
    }

    match run(&config) {
        Ok(_) => EXIT_OK,
        Err(e) => {
            log::error!(target: CRITICAL_TARGET, "{ABNORMAL_END} {e:#}");
            EXIT_FAILURE
        }
    }
}

fn fatal_before_logging(e: &anyhow::Error) -> u8 {
    ui::error(&format!("{ABNORMAL_END} {e:#}"));
    ui::dim("Run with --help for usage.");
    EXIT_FAILURE
}

fn run(config: &RunConfig) -> Result<RunSummary> {
    run_with(config, |config| {
        let backend = OciCli::new(config.oci_config.as_deref(), config.profile.as_deref())
            .context("Could not set up the OCI provider")?;
        log::debug!("Using OCI config {}", backend.config_file().display());
        Ok(backend)
    })
}

/// Load the manifest, then connect and walk it
///
/// `connect` is only called once the manifest has loaded.
fn run_with<B, F>(config: &RunConfig, connect: F) -> Result<RunSummary>
where
    B: Backend,
    F: FnOnce(&RunConfig) -> Result<B>,
{
    log::info!("{BANNER}");
    log::info!(
        "Command line: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );
    log::debug!(
        "Action {} on {} (log level {})",
        config.action,
        config.infra_file.display(),
        config.level
    );

    let manifest = Manifest::load(&config.infra_file)
        .with_context(|| format!("Could not load {}", config.infra_file.display()))?;
    if manifest.is_empty() {
        log::warn!(
            "Infrastructure file {} declares no resources.",
            config.infra_file.display()
        );
    } else {
        log::debug!(
            "Loaded {} resources in {} compartments",
            manifest.len(),
            manifest.compartments.len()
        );
    }

    let backend = connect(config)?;

    let registry = Registry::with_defaults();
    log::debug!(
        "Resource types: {}",
        registry.type_tags().collect::<Vec<_>>().join(", ")
    );

    let summary = walk(
        &manifest,
        config.action,
        &backend,
        &registry,
        &mut LogReporter,
    )?;

    Ok(summary)
}

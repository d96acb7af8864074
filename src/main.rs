//! netstate: host network state and fan-bridge DNS helper reconciliation
//!
//! Entry point for the netstate application.

use std::process::ExitCode;

use netstate::attach::CommandAttacher;
use netstate::config::{Cli, Command, ValidatedConfig, write_default_config};
use netstate::network::{StateBuilder, SysfsCounters, SysfsLinkSource, SysfsTree};

mod app;
mod commands;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use commands::CommandError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Subcommands that need no configuration
    match &cli.command {
        Some(Command::Init { output }) => return handle_init(output),
        Some(Command::Validate { kind, value }) => {
            return handle_validate((*kind).into(), value);
        }
        _ => {}
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);

    match &cli.command {
        Some(Command::State { interface }) => report(handle_state(&config, interface)),
        Some(Command::Interfaces) => report(handle_interfaces(&config)),
        Some(Command::Attach { device }) => report(handle_attach(&config, device)),
        _ => {
            tracing::info!("{config}");
            run_application(config)
        }
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `validate` subcommand.
fn handle_validate(kind: netstate::validate::ValidatorKind, value: &str) -> ExitCode {
    match commands::check_value(kind, value) {
        Ok(()) => {
            println!("Valid {kind}: {value:?}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid {kind}: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

fn handle_state(config: &ValidatedConfig, interface: &str) -> Result<String, CommandError> {
    let tree = SysfsTree::new(&config.sysfs_root);
    let builder = StateBuilder::new(tree.clone(), SysfsCounters::new(tree.clone()));
    commands::show_state(&builder, &SysfsLinkSource::new(tree), interface)
}

fn handle_interfaces(config: &ValidatedConfig) -> Result<String, CommandError> {
    let source = SysfsLinkSource::new(SysfsTree::new(&config.sysfs_root));
    commands::list_interfaces(&config.catalog(), &source)
}

fn handle_attach(config: &ValidatedConfig, device: &str) -> Result<String, CommandError> {
    let attacher = CommandAttacher::new(&config.attach_command)?;
    commands::attach_device(&config.catalog(), &attacher, device)
}

/// Prints a subcommand's output or its error.
fn report(result: Result<String, CommandError>) -> ExitCode {
    match result {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}

/// Runs the reconciliation daemon with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}

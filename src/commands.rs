//! One-shot subcommands.
//!
//! Each handler takes its collaborators as parameters so it can run against
//! an in-memory tree in tests; `main` wires in the real sysfs-backed ones.

use serde::Serialize;
use thiserror::Error;

use netstate::attach::{AttachError, AttachOutcome, InterfaceAttacher, auto_attach};
use netstate::catalog::NetworkCatalog;
use netstate::network::{
    AttributeTree, CounterCollector, EnumerationError, LinkSource, StateBuilder,
    enumerate_interfaces,
};
use netstate::validate::{ValidationError, ValidatorKind};

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Error type for subcommand failures.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Interface listing or lookup failed.
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    /// The attach hook is missing or failed.
    #[error(transparent)]
    Attach(#[from] AttachError),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders the state of `interface` as pretty JSON.
pub fn show_state<T, C, S>(
    builder: &StateBuilder<T, C>,
    source: &S,
    interface: &str,
) -> Result<String, CommandError>
where
    T: AttributeTree,
    C: CounterCollector,
    S: LinkSource,
{
    let state = builder.query(interface, source)?;
    to_json(&state)
}

/// Renders the merged list of configured networks and live interfaces.
pub fn list_interfaces<C, S>(catalog: &C, source: &S) -> Result<String, CommandError>
where
    C: NetworkCatalog,
    S: LinkSource,
{
    let names = enumerate_interfaces(catalog, source)?;
    to_json(&names)
}

/// Runs one validator over `value`.
pub fn check_value(kind: ValidatorKind, value: &str) -> Result<(), ValidationError> {
    kind.check(value)
}

/// Attaches `device` to the network listing it as an external interface.
pub fn attach_device<C, A>(
    catalog: &C,
    attacher: &A,
    device: &str,
) -> Result<String, CommandError>
where
    C: NetworkCatalog,
    A: InterfaceAttacher,
{
    let message = match auto_attach(catalog, attacher, device)? {
        AttachOutcome::Attached { network } => format!("Attached {device} to {network}"),
        AttachOutcome::NoMatch => format!("No network claims {device}"),
    };
    Ok(message)
}

fn to_json<V: Serialize + ?Sized>(value: &V) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}

//! Attach hook that delegates to an external command.

use std::process::Command;

use super::{AttachError, InterfaceAttacher};

/// Runs `<program> <args...> <network> <device>` to attach a device.
///
/// A non-zero exit status is an attach failure; the hook's standard error
/// is carried in the error for the operator.
#[derive(Debug, Clone)]
pub struct CommandAttacher {
    program: String,
    args: Vec<String>,
}

impl CommandAttacher {
    /// Creates an attacher from a command line (program followed by fixed arguments).
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::NotConfigured`] if `command` is empty.
    pub fn new(command: &[String]) -> Result<Self, AttachError> {
        let (program, args) = command.split_first().ok_or(AttachError::NotConfigured)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Returns the program that will be run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl InterfaceAttacher for CommandAttacher {
    fn attach(&self, network: &str, device: &str) -> Result<(), AttachError> {
        tracing::debug!(program = %self.program, network, device, "Running attach command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(network)
            .arg(device)
            .output()
            .map_err(|source| AttachError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(AttachError::HookFailed {
            network: network.to_string(),
            device: device.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

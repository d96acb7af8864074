//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::validate::ValidatorKind;

/// netstate: host network state and fan-bridge DNS helper reconciliation
///
/// Without a subcommand, runs the reconciliation daemon that keeps the DNS
/// helper server lists of fan-mode bridges in sync with cluster membership.
#[derive(Debug, Parser)]
#[command(name = "netstate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Root of the per-interface attribute tree
    #[arg(long = "sysfs-root", global = true, value_name = "DIR")]
    pub sysfs_root: Option<PathBuf>,

    /// Directory for per-network state
    #[arg(long = "state-dir", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Path to the cluster heartbeat JSON file
    #[arg(long = "heartbeat-file", value_name = "FILE")]
    pub heartbeat_file: Option<PathBuf>,

    /// This member's address, excluded from DNS helper server lists
    #[arg(long = "local-address", value_name = "ADDR")]
    pub local_address: Option<String>,

    /// Reconciliation interval in seconds
    #[arg(long = "reconcile-interval", value_name = "SECS")]
    pub reconcile_interval: Option<u64>,

    /// Attach hook command and fixed arguments (can be specified multiple times)
    #[arg(long = "attach-command", value_name = "ARG", global = true)]
    pub attach_command: Vec<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for netstate
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the state of one interface as JSON
    State {
        /// Interface name
        interface: String,
    },

    /// List configured networks and live interfaces
    Interfaces,

    /// Check a value with one of the validators
    Validate {
        /// Validator to use
        #[arg(value_enum)]
        kind: ValidatorArg,
        /// Value to check
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Attach a device to the network that lists it as an external interface
    Attach {
        /// Device name
        device: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netstate.toml")]
        output: PathBuf,
    },
}

/// Validator argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidatorArg {
    /// Interface name
    #[value(name = "name")]
    Name,
    /// Port number
    #[value(name = "port")]
    Port,
    /// IPv4 host address with prefix
    #[value(name = "ipv4-cidr")]
    Ipv4Cidr,
    /// IPv6 host address with prefix
    #[value(name = "ipv6-cidr")]
    Ipv6Cidr,
}

impl From<ValidatorArg> for ValidatorKind {
    fn from(arg: ValidatorArg) -> Self {
        match arg {
            ValidatorArg::Name => Self::Name,
            ValidatorArg::Port => Self::Port,
            ValidatorArg::Ipv4Cidr => Self::Ipv4Cidr,
            ValidatorArg::Ipv6Cidr => Self::Ipv6Cidr,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if no subcommand was given and the daemon should run.
    #[must_use]
    pub const fn is_daemon(&self) -> bool {
        self.command.is_none()
    }
}

//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command, ValidatorArg};
use crate::validate::ValidatorKind;

mod parsing {
    use super::*;

    #[test]
    fn no_args_runs_daemon() {
        let cli = Cli::parse_from_iter(["netstate"]);

        assert!(cli.is_daemon());
        assert!(!cli.is_init());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.attach_command.is_empty());
    }

    #[test]
    fn parse_daemon_options() {
        let cli = Cli::parse_from_iter([
            "netstate",
            "--sysfs-root",
            "/tmp/sys",
            "--state-dir",
            "/tmp/state",
            "--heartbeat-file",
            "/tmp/hb.json",
            "--local-address",
            "10.0.0.1",
            "--reconcile-interval",
            "10",
        ]);

        assert_eq!(cli.sysfs_root, Some(PathBuf::from("/tmp/sys")));
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/state")));
        assert_eq!(cli.heartbeat_file, Some(PathBuf::from("/tmp/hb.json")));
        assert_eq!(cli.local_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(cli.reconcile_interval, Some(10));
    }

    #[test]
    fn attach_command_can_repeat() {
        let cli = Cli::parse_from_iter([
            "netstate",
            "--attach-command",
            "/usr/bin/hook",
            "--attach-command",
            "attach",
        ]);

        assert_eq!(cli.attach_command, vec!["/usr/bin/hook", "attach"]);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from_iter(["netstate", "-c", "netstate.toml", "-v"]);

        assert_eq!(cli.config, Some(PathBuf::from("netstate.toml")));
        assert!(cli.verbose);
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn state_takes_interface() {
        let cli = Cli::parse_from_iter(["netstate", "state", "eth0"]);

        assert!(matches!(
            cli.command,
            Some(Command::State { ref interface }) if interface == "eth0"
        ));
        assert!(!cli.is_daemon());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "netstate",
            "state",
            "br0",
            "--sysfs-root",
            "/tmp/sys",
            "-v",
        ]);

        assert_eq!(cli.sysfs_root, Some(PathBuf::from("/tmp/sys")));
        assert!(cli.verbose);
    }

    #[test]
    fn interfaces() {
        let cli = Cli::parse_from_iter(["netstate", "interfaces"]);
        assert!(matches!(cli.command, Some(Command::Interfaces)));
    }

    #[test]
    fn validate_kind_and_value() {
        let cli = Cli::parse_from_iter(["netstate", "validate", "ipv4-cidr", "10.0.0.1/24"]);

        match cli.command {
            Some(Command::Validate { kind, value }) => {
                assert_eq!(kind, ValidatorArg::Ipv4Cidr);
                assert_eq!(value, "10.0.0.1/24");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_hyphen_value() {
        let cli = Cli::parse_from_iter(["netstate", "validate", "port", "-1"]);

        assert!(matches!(
            cli.command,
            Some(Command::Validate { ref value, .. }) if value == "-1"
        ));
    }

    #[test]
    fn validate_rejects_unknown_kind() {
        use clap::Parser;

        let result = Cli::try_parse_from(["netstate", "validate", "mac", "00:11"]);
        assert!(result.is_err());
    }

    #[test]
    fn attach_takes_device() {
        let cli = Cli::parse_from_iter(["netstate", "attach", "eth1"]);

        assert!(matches!(
            cli.command,
            Some(Command::Attach { ref device }) if device == "eth1"
        ));
    }

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["netstate", "init"]);

        assert!(cli.is_init());
        assert!(matches!(
            cli.command,
            Some(Command::Init { ref output }) if output == &PathBuf::from("netstate.toml")
        ));
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["netstate", "init", "-o", "custom.toml"]);

        assert!(matches!(
            cli.command,
            Some(Command::Init { ref output }) if output == &PathBuf::from("custom.toml")
        ));
    }
}

mod validator_arg {
    use super::*;

    #[test]
    fn converts_to_validator_kind() {
        assert_eq!(ValidatorKind::from(ValidatorArg::Name), ValidatorKind::Name);
        assert_eq!(ValidatorKind::from(ValidatorArg::Port), ValidatorKind::Port);
        assert_eq!(
            ValidatorKind::from(ValidatorArg::Ipv4Cidr),
            ValidatorKind::Ipv4Cidr
        );
        assert_eq!(
            ValidatorKind::from(ValidatorArg::Ipv6Cidr),
            ValidatorKind::Ipv6Cidr
        );
    }

    #[test]
    fn value_names_match_validator_display() {
        use clap::ValueEnum;

        for arg in ValidatorArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, ValidatorKind::from(*arg).to_string());
        }
    }
}

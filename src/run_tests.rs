//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn stream_terminated_displays_message() {
        let error = RunError::StreamTerminated;
        assert_eq!(error.to_string(), "Reconcile stream terminated unexpectedly");
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::StreamTerminated;
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("StreamTerminated"));
    }
}

mod describe_failure {
    use super::*;
    use netstate::catalog::CatalogError;

    #[test]
    fn cause_appears_once() {
        let error = ReconcileError::Load {
            name: "lxdfan0".to_string(),
            source: CatalogError::Unavailable {
                message: "database locked".to_string(),
            },
        };

        let message = describe_failure(&error);

        assert!(message.starts_with("Failed to load network lxdfan0: "));
        assert_eq!(message.matches("database locked").count(), 1);
    }
}

mod run_loop {
    use super::*;
    use netstate::catalog::CatalogError;

    fn report(refreshed: &[&str]) -> PassReport {
        PassReport {
            visited: 2,
            refreshed: refreshed.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn finished_stream_is_an_error() {
        let stream = tokio_stream::iter(vec![Ok(report(&["lxdfan0"])), Ok(report(&[]))]);

        let result = run_loop(stream, std::future::pending()).await;

        assert!(matches!(result, Err(RunError::StreamTerminated)));
    }

    #[tokio::test]
    async fn failed_pass_does_not_stop_loop() {
        let stream = tokio_stream::iter(vec![
            Err(ReconcileError::ListNetworks(CatalogError::Unavailable {
                message: "database locked".to_string(),
            })),
            Ok(report(&["lxdfan0"])),
        ]);

        let result = run_loop(stream, std::future::pending()).await;

        // Both items consumed, then the stream ends
        assert!(matches!(result, Err(RunError::StreamTerminated)));
    }

    #[tokio::test]
    async fn shutdown_wins_over_pending_stream() {
        let stream = tokio_stream::pending::<Result<PassReport, ReconcileError>>();

        let result = run_loop(stream, std::future::ready(())).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn shutdown_is_checked_first() {
        let stream = tokio_stream::iter(vec![Ok(report(&[]))]);

        let result = run_loop(stream, std::future::ready(())).await;

        assert!(result.is_ok());
    }
}

//! Global subscriber installation.
//!
//! Runs in its own test binary because a process accepts one global
//! subscriber.

use graph_client::TracingConfig;
use graph_client::tracing::TracingError;

#[test]
fn test_init_installs_once_then_reports_error() {
    let guard = TracingConfig::new()
        .with_default_filter("warn")
        .init()
        .expect("first subscriber should install");
    tracing::warn!("subscriber installed");

    match TracingConfig::new().with_stderr(false).init() {
        Err(TracingError::InitError(message)) => assert!(!message.is_empty()),
        Ok(_) => panic!("second global subscriber must be rejected"),
    }

    guard.shutdown();
}

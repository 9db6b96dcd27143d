//! Common utilities for integration tests

use expecto_core::{ExpectConfig, Location, MatcherAdapter, RecordingLogger};
use tracing_subscriber::EnvFilter;

/// Route adapter logs to the test writer; set `RUST_LOG=expecto_core=trace`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test helper bundling a logger and a fixed location
pub struct TestEnv {
    pub log: RecordingLogger,
    pub location: Location,
}

impl TestEnv {
    pub fn new() -> Self {
        init_tracing();
        Self {
            log: RecordingLogger::new(),
            location: Location::new("integration.rs", 1, 1),
        }
    }

    pub fn adapter(&self) -> MatcherAdapter<'_, RecordingLogger> {
        MatcherAdapter::new(&self.location, &self.log)
    }

    pub fn adapter_with(&self, config: ExpectConfig) -> MatcherAdapter<'_, RecordingLogger> {
        self.adapter().with_config(config)
    }

    /// Messages recorded so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.log.errors().into_iter().map(|e| e.message).collect()
    }
}

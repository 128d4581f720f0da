//! The configuration object the scanner consumes: everything the CLI
//! layer must supply before calling [`crate::scanner::run`].

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Concurrency cap. Defaults to 10.
    pub threads: usize,
    /// Per-request timeout. Defaults to 10 seconds.
    pub timeout: Duration,
    /// `http(s)://host:port`, applied uniformly to both schemes.
    pub proxy: Option<String>,
    /// Stop after fingerprint match; skip auth probes entirely.
    pub fingerprint_only: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: 10,
            timeout: Duration::from_secs(10),
            proxy: None,
            fingerprint_only: false,
        }
    }
}

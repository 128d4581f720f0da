//! An explicit, concurrency-safe sink for scan results: callers that want
//! to collect findings programmatically implement [`Reporter`] instead of
//! scraping log output. Everyday diagnostics still go through the `log`
//! crate, as throughout the rest of this crate.

use crate::auth::MatchResult;

/// One event worth reporting out of a scan.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A confirmed default credential, the headline finding of a scan.
    CredentialFound(MatchResult),
    /// A profile fingerprint matched a target (`fingerprint_only` mode, or
    /// every match en route to an auth probe).
    FingerprintMatched { profile_name: String, target_url: String },
}

/// Implementors must be safe to call from any worker thread concurrently.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &ScanEvent);
}

/// Default [`Reporter`]: `log::error!` for a confirmed credential, since
/// it's the finding an operator needs to see regardless of log level, and
/// `log::info!` for a fingerprint match.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingReporter;

impl Reporter for LoggingReporter {
    fn report(&self, event: &ScanEvent) {
        match event {
            ScanEvent::CredentialFound(m) => {
                log::error!(
                    "[+] Found {} default cred {}:{} at {}",
                    m.profile_name,
                    m.username,
                    m.password,
                    m.target_url
                );
            }
            ScanEvent::FingerprintMatched { profile_name, target_url } => {
                log::info!("{target_url} matched {profile_name}");
            }
        }
    }
}

/// An in-memory [`Reporter`] that just collects events. Used by tests and
/// by the CLI binary, which renders the accumulated events once a scan
/// finishes rather than reporting incrementally from worker threads.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: std::sync::Mutex<Vec<ScanEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<ScanEvent> {
        self.events.into_inner().unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, event: &ScanEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

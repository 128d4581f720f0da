//! # changeme
//!
//! A default-credential scanner for networked devices and web applications.
//!
//! Given a set of HTTP(S) targets, `changeme` identifies which product or
//! device is running behind each target from a single HTTP response
//! fingerprint, then tries a catalogue of known default credentials
//! against it via that product's own login scheme (HTTP Basic, an HTML
//! form POST, or a GET-parameter login).
//!
//! ## Pipeline
//!
//! [`catalogue::load`] reads the credential catalogue from a directory of
//! `.yml` profiles. [`target::expand`] cross-products targets × profiles
//! into concrete fingerprint URLs. [`scanner::run`] drives the scan: for
//! each URL, [`fingerprint::match_profiles`] classifies the response,
//! [`session`] extracts any required cookie/CSRF auxiliaries, and
//! [`auth::probe`] tries the profile's credentials, reporting confirmed
//! matches through a [`reporter::Reporter`].
//!
//! Command-line parsing, subnet enumeration, and colored terminal output
//! are not part of this crate's tested surface, see `src/bin/changeme.rs`
//! for the thin CLI wrapper.

pub mod auth;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod reporter;
pub mod scanner;
pub mod session;
pub mod target;

pub use auth::MatchResult;
pub use catalogue::{LoadReport, Profile};
pub use config::ScanConfig;
pub use error::{AdapterError, LoadError, StartupError};
pub use http_client::{AdapterConfig, HttpAdapter};
pub use reporter::{CollectingReporter, LoggingReporter, Reporter, ScanEvent};
pub use target::ExpandedTarget;

//! Fingerprinter: classifies an HTTP response against the loaded catalogue.
//!
//! Matching order, per profile, is fixed and AND-combined:
//!
//! 1. the response's path (+ query string) must be one of
//!    `fingerprint.url`;
//! 2. if declared, `fingerprint.status` must equal the response status;
//! 3. if declared, `fingerprint.basic_auth_realm` must be a substring of
//!    `WWW-Authenticate`;
//! 4. if declared, `fingerprint.body` must be a substring of the body.
//!
//! A profile matches iff (1) holds and every declared check in (2)-(4)
//! passes; undeclared checks impose no constraint.

use crate::catalogue::Profile;

/// The subset of an HTTP response the Fingerprinter needs, decoupled from
/// any particular HTTP client type so this module stays unit-testable
/// without spinning up a server.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// Path plus `?query` of the request that produced this response.
    pub path: String,
    pub status: u16,
    pub body: String,
    pub www_authenticate: Option<String>,
}

/// Every profile whose fingerprint block is satisfied by `response`.
pub fn match_profiles<'a>(response: &ProbeResponse, profiles: &'a [Profile]) -> Vec<&'a Profile> {
    profiles
        .iter()
        .filter(|profile| matches(response, profile))
        .collect()
}

fn matches(response: &ProbeResponse, profile: &Profile) -> bool {
    if !profile.fingerprint.url.iter().any(|u| u == &response.path) {
        return false;
    }

    if let Some(status) = profile.fingerprint.status {
        if status != response.status {
            return false;
        }
    }

    if let Some(realm) = &profile.fingerprint.basic_auth_realm {
        let header = response.www_authenticate.as_deref().unwrap_or("");
        if !header.contains(realm.as_str()) {
            return false;
        }
    }

    if let Some(body) = &profile.fingerprint.body {
        if !response.body.contains(body.as_str()) {
            return false;
        }
    }

    true
}

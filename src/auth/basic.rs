//! Basic-auth probe.

use super::success::success;
use super::MatchResult;
use crate::catalogue::Profile;
use crate::http_client::HttpAdapter;

/// For each credential pair, GET the fingerprint URL with HTTP Basic auth
/// and evaluate success. A connection failure for one credential is logged
/// and the loop continues with the next. Unlike Form/Get, a single failed
/// request here does not abort the whole probe.
pub fn probe(adapter: &HttpAdapter, fingerprint_url: &str, profile: &Profile) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    for cred in &profile.auth.credentials {
        let username = cred.username();
        let password = cred.password();

        match adapter.basic_auth(fingerprint_url, username, password) {
            Ok(outcome) => {
                if success(&outcome, &profile.auth.success) {
                    log::debug!(
                        "[basic] {} matched {username}:{password} at {fingerprint_url}",
                        profile.name
                    );
                    matches.push(MatchResult {
                        profile_name: profile.name.clone(),
                        username: username.to_string(),
                        password: password.to_string(),
                        target_url: fingerprint_url.to_string(),
                    });
                } else {
                    log::info!(
                        "[basic] invalid {} cred {username}:{password} at {fingerprint_url}",
                        profile.name
                    );
                }
            }
            Err(e) => {
                log::debug!("[basic] failed to connect to {fingerprint_url}: {e}");
            }
        }
    }

    matches
}

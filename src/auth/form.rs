//! Form-auth probe.

use super::success::success;
use super::{build_base_url, build_params, MatchResult};
use crate::catalogue::Profile;
use crate::http_client::HttpAdapter;

/// POST the rendered parameter map to each `auth.url` login path, for each
/// credential. A connection failure aborts the entire probe immediately,
/// discarding any matches already found in this call.
pub fn probe(
    adapter: &HttpAdapter,
    fingerprint_url: &str,
    profile: &Profile,
    session_cookie: Option<&(String, String)>,
    csrf: Option<&str>,
) -> Vec<MatchResult> {
    let Some(template) = profile.auth.param_template() else {
        return Vec::new();
    };
    let base_url = build_base_url(fingerprint_url);
    let mut matches = Vec::new();

    for cred in &profile.auth.credentials {
        let username = cred.username();
        let password = cred.password();
        let params = build_params(template, &profile.auth.csrf, csrf, username, password);

        for path in &profile.auth.url {
            let url = format!("{base_url}{path}");
            log::debug!("[form] {url} params: {params:?}");

            match adapter.form_post(&url, &params, session_cookie) {
                Ok(outcome) => {
                    if success(&outcome, &profile.auth.success) {
                        log::debug!(
                            "[form] {} matched {username}:{password} at {fingerprint_url}",
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
                            "[form] invalid {} cred {username}:{password} at {fingerprint_url}",
                            profile.name
                        );
                    }
                }
                Err(e) => {
                    log::debug!("[form] failed to connect to {url}: {e}");
                    return Vec::new();
                }
            }
        }
    }

    matches
}

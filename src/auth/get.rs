//! Get-auth probe: identical to Form except the parameters are URL-encoded
//! as a query string and sent via GET.

use super::success::success;
use super::{build_base_url, build_params, MatchResult};
use crate::catalogue::Profile;
use crate::http_client::HttpAdapter;

/// Same credential times login-path iteration and first-failure-aborts-the-
/// probe network policy as [`super::form::probe`].
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
            log::debug!("[get] {url} params: {params:?}");

            match adapter.get_with_query(&url, &params, session_cookie) {
                Ok(outcome) => {
                    if success(&outcome, &profile.auth.success) {
                        log::debug!(
                            "[get] {} matched {username}:{password} at {fingerprint_url}",
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
                            "[get] invalid {} cred {username}:{password} at {fingerprint_url}",
                            profile.name
                        );
                    }
                }
                Err(e) => {
                    log::debug!("[get] failed to connect to {url}: {e}");
                    return Vec::new();
                }
            }
        }
    }

    matches
}

//! Auth Probes: three strategies sharing one contract,
//! `probe(fingerprint_url, profile, session?, csrf?) -> Vec<MatchResult>`,
//! dispatched on a closed [`crate::catalogue::AuthKind`].

mod basic;
mod form;
mod get;
pub mod success;

use crate::catalogue::{AuthKind, ParamTemplate, Profile};
use crate::http_client::HttpAdapter;

/// One confirmed default-credential finding: `(profile, credential, url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub profile_name: String,
    pub username: String,
    pub password: String,
    pub target_url: String,
}

/// Run the auth probe matching `profile.auth.kind`.
pub fn probe(
    adapter: &HttpAdapter,
    fingerprint_url: &str,
    profile: &Profile,
    session_cookie: Option<&(String, String)>,
    csrf: Option<&str>,
) -> Vec<MatchResult> {
    match profile.auth.kind {
        AuthKind::Basic => basic::probe(adapter, fingerprint_url, profile),
        AuthKind::Form => form::probe(adapter, fingerprint_url, profile, session_cookie, csrf),
        AuthKind::Get => get::probe(adapter, fingerprint_url, profile, session_cookie, csrf),
    }
}

/// `scheme://host[:port]` of `url`, with no path: the base that Form/Get
/// concatenate each `auth.url` login path onto.
fn build_base_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().map(|h| match parsed.port() {
                Some(port) => format!("{h}:{port}"),
                None => h.to_string(),
            }).unwrap_or_default()
        ),
        Err(_) => url.to_string(),
    }
}

/// The static parameter map for this attempt: the template's `extra`
/// fields, overlaid with the candidate username/password, overlaid with
/// the CSRF field if one was captured.
fn build_params(
    template: &ParamTemplate,
    csrf_field: &Option<String>,
    csrf_value: Option<&str>,
    username: &str,
    password: &str,
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = template.extra.clone();
    params.push((template.username_field.clone(), username.to_string()));
    params.push((template.password_field.clone(), password.to_string()));

    if let (Some(field), Some(value)) = (csrf_field, csrf_value) {
        params.push((field.clone(), value.to_string()));
    }

    params
}

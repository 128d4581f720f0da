//! Semantic validation that serde's type system can't express on its own.
//!
//! Kept as a separate pass from deserialization: a file can parse as valid
//! YAML and still describe a profile that makes no sense (an empty
//! fingerprint URL list, a `form` auth with no login path). Those are
//! schema failures, not parse failures, and the loader reports them under
//! a distinct [`crate::error::LoadError`] variant so diagnostics stay
//! precise.

use super::profile::{AuthKind, Profile};

/// Returns every schema violation found in `profile`; empty means valid.
pub fn validate(profile: &Profile) -> Vec<String> {
    let mut errors = Vec::new();

    if profile.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if profile.default_port == 0 {
        errors.push("default_port must be in 1..=65535".to_string());
    }
    if profile.fingerprint.url.is_empty() {
        errors.push("fingerprint.url must contain at least one path".to_string());
    }
    for path in &profile.fingerprint.url {
        if !path.starts_with('/') {
            errors.push(format!("fingerprint.url entry {path:?} must begin with '/'"));
        }
    }
    if profile.auth.credentials.is_empty() {
        errors.push("auth.credentials must contain at least one entry".to_string());
    }

    match profile.auth.kind {
        AuthKind::Basic => {}
        AuthKind::Form | AuthKind::Get => {
            if profile.auth.url.is_empty() {
                errors.push(format!(
                    "auth.url must contain at least one login path for auth.type: {:?}",
                    profile.auth.kind
                ));
            }
            if profile.auth.param_template().is_none() {
                let key = if profile.auth.kind == AuthKind::Form { "form" } else { "get" };
                errors.push(format!("auth.{key} sub-record is required for auth.type: {key}"));
            }
        }
    }

    if profile.auth.success.status.is_none() && profile.auth.success.body.is_none() {
        errors.push("auth.success must declare status and/or body".to_string());
    }
    if let Some(body) = &profile.auth.success.body {
        if let Err(e) = regex::Regex::new(body) {
            errors.push(format!("auth.success.body is not a valid regex: {e}"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::profile::{Auth, Credential, Fingerprint, Success};

    fn minimal_profile() -> Profile {
        Profile {
            name: "Test Profile".into(),
            category: "test".into(),
            contributor: "nobody".into(),
            default_port: 80,
            ssl: false,
            fingerprint: Fingerprint {
                url: vec!["/".into()],
                status: Some(401),
                body: None,
                basic_auth_realm: None,
            },
            auth: Auth {
                kind: AuthKind::Basic,
                url: vec![],
                credentials: vec![Credential {
                    username: Some("admin".into()),
                    password: Some("admin".into()),
                }],
                form: None,
                get: None,
                sessionid: None,
                csrf: None,
                success: Success {
                    status: Some(200),
                    body: None,
                },
            },
        }
    }

    #[test]
    fn minimal_basic_profile_is_valid() {
        assert!(validate(&minimal_profile()).is_empty());
    }

    #[test]
    fn empty_fingerprint_url_is_rejected() {
        let mut p = minimal_profile();
        p.fingerprint.url.clear();
        let errs = validate(&p);
        assert!(errs.iter().any(|e| e.contains("fingerprint.url")));
    }

    #[test]
    fn form_auth_without_login_path_is_rejected() {
        let mut p = minimal_profile();
        p.auth.kind = AuthKind::Form;
        let errs = validate(&p);
        assert!(errs.iter().any(|e| e.contains("auth.url")));
        assert!(errs.iter().any(|e| e.contains("auth.form")));
    }

    #[test]
    fn success_with_no_criteria_is_rejected() {
        let mut p = minimal_profile();
        p.auth.success.status = None;
        p.auth.success.body = None;
        let errs = validate(&p);
        assert!(errs.iter().any(|e| e.contains("auth.success")));
    }

    #[test]
    fn invalid_success_regex_is_rejected() {
        let mut p = minimal_profile();
        p.auth.success.body = Some("(unterminated".into());
        let errs = validate(&p);
        assert!(errs.iter().any(|e| e.contains("regex")));
    }
}

//! Scanner: the bounded-concurrency driver that sequences Fingerprinter →
//! Session/CSRF Extractor → Auth Probe → Success Evaluator for every target
//! URL.
//!
//! Concurrency is a fixed pool of `config.threads` OS threads pulling from
//! a shared work queue. Every blocking point lives inside an HTTP Adapter
//! call, and concurrency is bounded structurally, since there are only
//! ever `threads` workers, rather than by sampling an active-worker count.

use std::sync::{Arc, Mutex};
use std::thread;

use crate::auth;
use crate::catalogue::Profile;
use crate::config::ScanConfig;
use crate::fingerprint;
use crate::http_client::HttpAdapter;
use crate::reporter::{Reporter, ScanEvent};
use crate::session;
use crate::target::ExpandedTarget;

/// Run the scan: fingerprint every URL, and, unless `config.fingerprint_only`,
/// auth-probe every profile that matched. Results from distinct URLs are
/// independent; there is no ordering guarantee across them.
pub fn run(
    targets: Vec<ExpandedTarget>,
    profiles: Arc<Vec<Profile>>,
    config: &ScanConfig,
    adapter: HttpAdapter,
    reporter: Arc<dyn Reporter>,
) -> Vec<auth::MatchResult> {
    let queue = Arc::new(Mutex::new(targets.into_iter()));
    let results = Arc::new(Mutex::new(Vec::new()));
    let thread_count = config.threads.max(1);

    thread::scope(|scope| {
        for _ in 0..thread_count {
            let queue = Arc::clone(&queue);
            let results = Arc::clone(&results);
            let profiles = Arc::clone(&profiles);
            let reporter = Arc::clone(&reporter);
            let adapter = adapter.clone();
            let fingerprint_only = config.fingerprint_only;

            scope.spawn(move || loop {
                let next = {
                    let mut queue = queue.lock().unwrap();
                    queue.next()
                };
                let Some(target) = next else { break };

                let found = scan_one(&adapter, &target.url, &profiles, fingerprint_only, &*reporter);
                if !found.is_empty() {
                    results.lock().unwrap().extend(found);
                }
            });
        }
    });

    Arc::try_unwrap(results)
        .map(|m| m.into_inner().unwrap())
        .unwrap_or_default()
}

fn scan_one(
    adapter: &HttpAdapter,
    url: &str,
    profiles: &[Profile],
    fingerprint_only: bool,
    reporter: &dyn Reporter,
) -> Vec<auth::MatchResult> {
    let fetch = match adapter.fingerprint(url) {
        Ok(fetch) => fetch,
        Err(e) => {
            log::debug!("[scan] failed to connect to {url}: {e}");
            return Vec::new();
        }
    };

    let matched = fingerprint::match_profiles(&fetch.response, profiles);
    log::debug!("[scan] {} fingerprint matches for {url}", matched.len());

    let mut results = Vec::new();

    for profile in matched {
        log::info!("[scan] {url} matched {}", profile.name);

        if fingerprint_only {
            reporter.report(&ScanEvent::FingerprintMatched {
                profile_name: profile.name.clone(),
                target_url: url.to_string(),
            });
            continue;
        }

        let csrf = match &profile.auth.csrf {
            Some(field) => match session::extract_csrf(&fetch.body_html, field) {
                Some(value) => Some(value),
                None => {
                    log::debug!("[scan] missing required csrf for {}", profile.name);
                    continue;
                }
            },
            None => None,
        };

        let session_cookie = match &profile.auth.sessionid {
            Some(name) => match session::extract_session(&fetch.set_cookie_headers, name) {
                Some(pair) => Some(pair),
                None => {
                    log::debug!("[scan] missing required sessionid for {}", profile.name);
                    continue;
                }
            },
            None => None,
        };

        let matches = auth::probe(
            adapter,
            url,
            profile,
            session_cookie.as_ref(),
            csrf.as_deref(),
        );

        for m in matches {
            reporter.report(&ScanEvent::CredentialFound(m.clone()));
            results.push(m);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Auth, AuthKind, Credential, Fingerprint, Success};
    use crate::http_client::AdapterConfig;
    use crate::reporter::CollectingReporter;
    use std::time::Duration;

    fn basic_profile(name: &str, path: &str) -> Profile {
        Profile {
            name: name.into(),
            category: "test".into(),
            contributor: "test".into(),
            default_port: 80,
            ssl: false,
            fingerprint: Fingerprint {
                url: vec![path.into()],
                status: Some(401),
                body: None,
                basic_auth_realm: Some("Router".into()),
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
    fn basic_auth_discovery_scenario() {
        let mut server = mockito::Server::new();
        let fingerprint_mock = server
            .mock("GET", "/")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(401)
            .with_header("WWW-Authenticate", r#"Basic realm="Router""#)
            .create();
        let auth_mock = server
            .mock("GET", "/")
            .match_header("authorization", "Basic YWRtaW46YWRtaW4=")
            .with_status(200)
            .create();

        let profile = basic_profile("Acme Router", "/");
        let profiles = Arc::new(vec![profile]);
        let targets = vec![ExpandedTarget {
            url: format!("{}/", server.url()),
            profile_name: "Acme Router".to_string(),
        }];

        let adapter = HttpAdapter::new(&AdapterConfig {
            timeout: Duration::from_secs(5),
            proxy: None,
        })
        .unwrap();
        let reporter = Arc::new(CollectingReporter::new());
        let config = ScanConfig {
            threads: 2,
            ..ScanConfig::default()
        };

        let results = run(targets, profiles, &config, adapter, reporter.clone() as Arc<dyn Reporter>);

        fingerprint_mock.assert();
        auth_mock.assert();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].username, "admin");
        assert_eq!(results[0].password, "admin");
    }
}

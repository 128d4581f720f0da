//! Form auth with a CSRF token scraped from the fingerprint response and
//! resent with the login POST.

use std::sync::Arc;
use std::time::Duration;

use changeme::catalogue::Profile;
use changeme::config::ScanConfig;
use changeme::http_client::{AdapterConfig, HttpAdapter};
use changeme::reporter::CollectingReporter;
use changeme::target::ExpandedTarget;
use changeme::{Reporter, ScanEvent};

fn form_profile() -> Profile {
    let yaml = r#"
name: Acme CMS
category: cms
contributor: test
default_port: 80
ssl: false
fingerprint:
  url: ["/login"]
auth:
  type: form
  url: ["/login"]
  credentials:
    - username: root
      password: toor
  form:
    username: user
    password: pass
  csrf: authenticity_token
  success:
    body: "Welcome"
"#;
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn form_post_includes_csrf_and_matches_on_welcome_body() {
    let mut server = mockito::Server::new();

    let fingerprint_mock = server
        .mock("GET", "/login")
        .with_status(200)
        .with_body(r#"<form><input name="authenticity_token" value="XYZ"></form>"#)
        .create();

    let auth_mock = server
        .mock("POST", "/login")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("user".into(), "root".into()),
            mockito::Matcher::UrlEncoded("pass".into(), "toor".into()),
            mockito::Matcher::UrlEncoded("authenticity_token".into(), "XYZ".into()),
        ]))
        .with_status(200)
        .with_body("Welcome, root!")
        .create();

    let profiles = Arc::new(vec![form_profile()]);
    let targets = vec![ExpandedTarget {
        url: format!("{}/login", server.url()),
        profile_name: "Acme CMS".to_string(),
    }];

    let adapter = HttpAdapter::new(&AdapterConfig {
        timeout: Duration::from_secs(5),
        proxy: None,
    })
    .unwrap();
    let reporter = Arc::new(CollectingReporter::new());
    let config = ScanConfig {
        threads: 1,
        ..ScanConfig::default()
    };

    let results = changeme::scanner::run(
        targets,
        profiles,
        &config,
        adapter,
        reporter.clone() as Arc<dyn Reporter>,
    );

    fingerprint_mock.assert();
    auth_mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].username, "root");
    assert_eq!(results[0].password, "toor");

    let events = Arc::try_unwrap(reporter).unwrap().into_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, ScanEvent::CredentialFound(m) if m.username == "root")));
}

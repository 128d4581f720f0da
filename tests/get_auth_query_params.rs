//! Get-auth probe: credentials and static parameters are URL-encoded as a
//! query string and sent via GET, rather than POSTed as a form body.

use std::sync::Arc;
use std::time::Duration;

use changeme::catalogue::Profile;
use changeme::config::ScanConfig;
use changeme::http_client::{AdapterConfig, HttpAdapter};
use changeme::reporter::CollectingReporter;
use changeme::target::ExpandedTarget;
use changeme::Reporter;

fn get_profile() -> Profile {
    let yaml = r#"
name: Generic GET-Parameter Admin Panel
category: web
contributor: test
default_port: 80
ssl: false
fingerprint:
  url: ["/admin/login.cgi"]
auth:
  type: get
  url: ["/admin/auth.cgi"]
  credentials:
    - username: admin
      password: admin
  get:
    username: user
    password: pwd
  success:
    status: 200
    body: "Administration Console"
"#;
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn get_auth_sends_credentials_as_query_params() {
    let mut server = mockito::Server::new();

    let fingerprint_mock = server
        .mock("GET", "/admin/login.cgi")
        .with_status(200)
        .with_body("<html>login</html>")
        .create();

    let auth_mock = server
        .mock("GET", "/admin/auth.cgi")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("user".into(), "admin".into()),
            mockito::Matcher::UrlEncoded("pwd".into(), "admin".into()),
        ]))
        .with_status(200)
        .with_body("Administration Console")
        .create();

    let profiles = Arc::new(vec![get_profile()]);
    let targets = vec![ExpandedTarget {
        url: format!("{}/admin/login.cgi", server.url()),
        profile_name: "Generic GET-Parameter Admin Panel".to_string(),
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
        reporter as Arc<dyn Reporter>,
    );

    fingerprint_mock.assert();
    auth_mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].username, "admin");
    assert_eq!(results[0].password, "admin");
}

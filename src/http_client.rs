//! HTTP Adapter: the one place every outbound request passes through,
//! applying timeout, proxy, and TLS-skip uniformly.
//!
//! Built on `reqwest::blocking`, since a fingerprint here is read out of an
//! HTTP response, never a raw TLS handshake, and `reqwest::blocking::Client`
//! already gives this adapter everything it needs.

use std::time::Duration;

use crate::error::AdapterError;
use crate::fingerprint::ProbeResponse;

/// Runtime knobs for the adapter: request timeout and optional proxy.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            proxy: None,
        }
    }
}

/// The fingerprint GET response, plus the raw `Set-Cookie` header values
/// the Session Extractor needs (kept separate from [`ProbeResponse`], which
/// stays HTTP-client-agnostic for unit testing).
#[derive(Debug, Clone)]
pub struct FingerprintFetch {
    pub response: ProbeResponse,
    pub body_html: String,
    pub set_cookie_headers: Vec<String>,
}

/// The result of an authenticated probe request.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: u16,
    pub body: String,
}

/// Safe under concurrent use: `reqwest::blocking::Client` pools connections
/// internally and is `Clone + Send + Sync`.
#[derive(Clone)]
pub struct HttpAdapter {
    client: reqwest::blocking::Client,
}

impl HttpAdapter {
    pub fn new(config: &AdapterConfig) -> Result<Self, AdapterError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            // Deliberate: this tool probes misconfigured devices, which
            // routinely present self-signed or expired certificates.
            // No `.cookie_store(true)`: session cookies are managed
            // explicitly by the Session Extractor and resent as a single
            // `Cookie` header, not accumulated automatically.
            .danger_accept_invalid_certs(true);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|_| AdapterError::InvalidProxy(proxy_url.clone()))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// The fingerprint GET.
    pub fn fingerprint(&self, url: &str) -> Result<FingerprintFetch, AdapterError> {
        let response = self.client.get(url).send()?;

        let status = response.status().as_u16();
        let www_authenticate = response
            .headers()
            .get(reqwest::header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookie_headers = response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let path = path_and_query(response.url());
        let body_html = response.text()?;

        Ok(FingerprintFetch {
            response: ProbeResponse {
                path,
                status,
                body: body_html.clone(),
                www_authenticate,
            },
            body_html,
            set_cookie_headers,
        })
    }

    /// Basic-auth probe: GET with HTTP Basic credentials.
    pub fn basic_auth(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<ProbeOutcome, AdapterError> {
        let response = self
            .client
            .get(url)
            .basic_auth(username, Some(password))
            .send()?;
        to_outcome(response)
    }

    /// Form-auth probe: POST with a urlencoded body and the captured
    /// session cookie, if any.
    pub fn form_post(
        &self,
        url: &str,
        params: &[(String, String)],
        session_cookie: Option<&(String, String)>,
    ) -> Result<ProbeOutcome, AdapterError> {
        let mut req = self.client.post(url).form(params);
        if let Some((name, value)) = session_cookie {
            req = req.header(reqwest::header::COOKIE, format!("{name}={value}"));
        }
        to_outcome(req.send()?)
    }

    /// Get-auth probe: GET with the credentials and static parameters
    /// URL-encoded as a query string.
    pub fn get_with_query(
        &self,
        url: &str,
        params: &[(String, String)],
        session_cookie: Option<&(String, String)>,
    ) -> Result<ProbeOutcome, AdapterError> {
        let mut req = self.client.get(url).query(params);
        if let Some((name, value)) = session_cookie {
            req = req.header(reqwest::header::COOKIE, format!("{name}={value}"));
        }
        to_outcome(req.send()?)
    }
}

fn to_outcome(response: reqwest::blocking::Response) -> Result<ProbeOutcome, AdapterError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    Ok(ProbeOutcome { status, body })
}

fn path_and_query(url: &reqwest::Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

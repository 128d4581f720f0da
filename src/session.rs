//! Session/CSRF Extractor: pulls auxiliary state out of the fingerprint
//! response that an auth probe must echo back.

use scraper::{Html, Selector};

/// Parse the `name=value` pair out of one `Set-Cookie` header value,
/// ignoring the `Domain=`/`Path=`/`Secure`/... attributes that follow the
/// first `;`. Only the bare name/value pair is needed to resend it.
fn parse_cookie_pair(set_cookie: &str) -> Option<(String, String)> {
    let first = set_cookie.split(';').next()?;
    let mut parts = first.splitn(2, '=');
    let name = parts.next()?.trim();
    let value = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

/// Find `cookie_name` among a response's `Set-Cookie` header values.
/// Returns `None` if the cookie wasn't set; the caller skips the profile
/// for that target in that case.
pub fn extract_session(set_cookie_headers: &[String], cookie_name: &str) -> Option<(String, String)> {
    set_cookie_headers.iter().find_map(|header| {
        let (name, value) = parse_cookie_pair(header)?;
        (name == cookie_name).then_some((name, value))
    })
}

/// Scrape the `value` attribute off `input[name="field_name"]` in
/// `body_html`. Returns `None` if no such node is found, or the node has
/// no `value` attribute.
pub fn extract_csrf(body_html: &str, field_name: &str) -> Option<String> {
    let selector_str = format!(r#"input[name="{}"]"#, css_escape(field_name));
    let selector = Selector::parse(&selector_str).ok()?;
    let document = Html::parse_document(body_html);
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string)
}

/// Minimal escaping for values interpolated into a CSS attribute selector.
/// Field names come from the catalogue, not untrusted input, but a stray
/// `"` shouldn't break the generated selector.
fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

//! The credential-catalogue data model.
//!
//! A [`Profile`] is one catalogue entry: how to recognize a product from an
//! HTTP response, and how to try default credentials against it once
//! recognized. Profiles are deserialized straight from the `.yml` files a
//! [`super::loader`] walks; `#[serde(default)]` covers every field the
//! schema marks optional so that a missing optional key never fails
//! deserialization, while a missing required key does (serde_yaml surfaces
//! that as a parse error, which the loader reports as such).

use serde::Deserialize;

/// One entry in the credential catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub contributor: String,
    #[serde(default = "default_port")]
    pub default_port: u16,
    #[serde(default)]
    pub ssl: bool,
    pub fingerprint: Fingerprint,
    pub auth: Auth,
}

fn default_port() -> u16 {
    80
}

impl Profile {
    /// `https` if `ssl`, else `http`.
    pub fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fingerprint {
    pub url: Vec<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub basic_auth_realm: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    Basic,
    Form,
    Get,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub kind: AuthKind,
    #[serde(default)]
    pub url: Vec<String>,
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub form: Option<ParamTemplate>,
    #[serde(default)]
    pub get: Option<ParamTemplate>,
    #[serde(default)]
    pub sessionid: Option<String>,
    #[serde(default)]
    pub csrf: Option<String>,
    pub success: Success,
}

impl Auth {
    /// The `form` or `get` sub-record, whichever applies to `self.kind`,
    /// falling back to the other if the matching one is absent.
    pub fn param_template(&self) -> Option<&ParamTemplate> {
        match self.kind {
            AuthKind::Form => self.form.as_ref().or(self.get.as_ref()),
            AuthKind::Get => self.get.as_ref().or(self.form.as_ref()),
            AuthKind::Basic => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credential {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }
}

/// The `form`/`get` sub-record: which field names carry the username and
/// password, plus any other static parameters the login endpoint expects.
///
/// `username`, `password`, and `url` are reserved keys within the raw YAML
/// mapping this is built from and are excluded from `extra`, see
/// [`ParamTemplate::from_mapping`].
#[derive(Debug, Clone, Default)]
pub struct ParamTemplate {
    pub username_field: String,
    pub password_field: String,
    pub extra: Vec<(String, String)>,
}

impl<'de> Deserialize<'de> for ParamTemplate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let raw: std::collections::BTreeMap<String, String> =
            Deserialize::deserialize(deserializer)?;
        Self::from_mapping(raw).map_err(D::Error::custom)
    }
}

impl ParamTemplate {
    const RESERVED: [&'static str; 3] = ["username", "password", "url"];

    fn from_mapping(raw: std::collections::BTreeMap<String, String>) -> Result<Self, String> {
        let username_field = raw
            .get("username")
            .cloned()
            .ok_or_else(|| "missing 'username' key".to_string())?;
        let password_field = raw
            .get("password")
            .cloned()
            .ok_or_else(|| "missing 'password' key".to_string())?;
        let extra = raw
            .into_iter()
            .filter(|(k, _)| !Self::RESERVED.contains(&k.as_str()))
            .collect();
        Ok(Self {
            username_field,
            password_field,
            extra,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Success {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub body: Option<String>,
}

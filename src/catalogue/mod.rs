//! The declarative credential-profile catalogue and its load-time
//! validation.

mod loader;
mod profile;
mod validate;

pub use loader::{load, LoadReport};
pub use profile::{Auth, AuthKind, Credential, Fingerprint, ParamTemplate, Profile, Success};
pub use validate::validate;

use std::collections::BTreeSet;

/// The distinct set of `contributor` values across `profiles`, sorted.
/// Backs the CLI's `--contributors` flag.
pub fn contributors(profiles: &[Profile]) -> BTreeSet<&str> {
    profiles.iter().map(|p| p.contributor.as_str()).collect()
}

/// One line per credential pair, grouped by profile name. Backs the CLI's
/// `--dump` flag.
pub fn dump_view(profiles: &[Profile]) -> Vec<(String, Vec<(String, String)>)> {
    profiles
        .iter()
        .map(|p| {
            let creds = p
                .auth
                .credentials
                .iter()
                .map(|c| (c.username().to_string(), c.password().to_string()))
                .collect();
            (p.name.clone(), creds)
        })
        .collect()
}

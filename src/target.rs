//! Target Expander: cross-product of targets × profiles into concrete
//! fingerprint-probe URLs.

use crate::catalogue::Profile;

/// One probe URL paired with the profile that produced it, so later stages
/// (Fingerprinter, Auth Probes) don't have to re-derive which profile a URL
/// belongs to.
#[derive(Debug, Clone)]
pub struct ExpandedTarget {
    pub url: String,
    pub profile_name: String,
}

/// For every `(target, profile)` pair that passes the filters, for every
/// path in `profile.fingerprint.url`, emit `scheme://target:port/path`.
///
/// Pure and allocation-only. No I/O, no normalization of `targets` beyond
/// string interpolation: targets may be bare hosts or IPs.
pub fn expand(
    targets: &[String],
    profiles: &[Profile],
    filter_name: Option<&str>,
    filter_category: Option<&str>,
) -> Vec<ExpandedTarget> {
    let mut urls = Vec::new();

    for target in targets {
        for profile in profiles {
            if let Some(name) = filter_name {
                if profile.name != name {
                    continue;
                }
            }
            if let Some(category) = filter_category {
                if profile.category != category {
                    continue;
                }
            }

            for path in &profile.fingerprint.url {
                let url = format!(
                    "{}://{}:{}{}",
                    profile.scheme(),
                    target,
                    profile.default_port,
                    path
                );
                log::debug!("[expand] rendered url: {url}");
                urls.push(ExpandedTarget {
                    url,
                    profile_name: profile.name.clone(),
                });
            }
        }
    }

    urls
}

//! Catalogue Loader: walks a directory tree, parses every `.yml` file as
//! one [`Profile`], validates it, and rejects duplicates.
//!
//! Malformed files never abort the load. Each is logged and skipped, and
//! the walk continues.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::profile::Profile;
use super::validate;
use crate::error::LoadError;

/// Outcome of a full catalogue load: the profiles that made it in, and a
/// record of everything that didn't (and why), so a caller can print
/// diagnostics without depending on log output.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub profiles: Vec<Profile>,
    pub skipped: Vec<(PathBuf, LoadError)>,
}

impl LoadReport {
    /// Total number of individual credentials across all loaded profiles.
    pub fn total_credentials(&self) -> usize {
        self.profiles
            .iter()
            .map(|p| p.auth.credentials.len())
            .sum()
    }
}

/// Walk `root` and load every syntactically valid, schema-valid,
/// non-duplicate `.yml` profile beneath it, optionally narrowed to a single
/// `name` and/or `category`. Both filters compose by conjunction.
pub fn load(
    root: &Path,
    filter_name: Option<&str>,
    filter_category: Option<&str>,
) -> LoadReport {
    let mut report = LoadReport::default();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut first_seen: Vec<(String, PathBuf)> = Vec::new();

    let mut files = Vec::new();
    walk(root, &mut files);
    files.sort();

    for path in files {
        match load_one(&path) {
            Ok(profile) => {
                if seen_names.contains(&profile.name) {
                    let first = first_seen
                        .iter()
                        .find(|(name, _)| name == &profile.name)
                        .map(|(_, p)| p.clone())
                        .unwrap_or_else(|| path.clone());
                    log::error!(
                        "[load] {}: duplicate profile name {:?} (first loaded from {})",
                        path.display(),
                        profile.name,
                        first.display()
                    );
                    report.skipped.push((
                        path.clone(),
                        LoadError::Duplicate {
                            path: path.clone(),
                            name: profile.name.clone(),
                            first_seen: first,
                        },
                    ));
                    continue;
                }

                if !in_scope(&profile, filter_name, filter_category) {
                    log::debug!("[load] {} out of scope, skipping", path.display());
                    continue;
                }

                seen_names.insert(profile.name.clone());
                first_seen.push((profile.name.clone(), path.clone()));
                log::debug!("[load] loaded profile {:?} from {}", profile.name, path.display());
                report.profiles.push(profile);
            }
            Err(e) => {
                log::error!("[load] {}", e);
                report.skipped.push((path, e));
            }
        }
    }

    report
}

fn in_scope(profile: &Profile, filter_name: Option<&str>, filter_category: Option<&str>) -> bool {
    if let Some(name) = filter_name {
        if profile.name != name {
            return false;
        }
    }
    if let Some(category) = filter_category {
        if profile.category != category {
            return false;
        }
    }
    true
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("[load] failed to read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().and_then(|e| e.to_str()) == Some("yml") {
            out.push(path);
        }
    }
}

fn load_one(path: &Path) -> Result<Profile, LoadError> {
    let raw = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let profile: Profile =
        serde_yaml::from_str(&raw).map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;

    let errors = validate::validate(&profile);
    if !errors.is_empty() {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            errors,
        });
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(dir: &Path, filename: &str, contents: &str) {
        let path = dir.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    const ROUTER_YML: &str = r#"
name: Acme Router
category: router
contributor: jane
default_port: 8080
ssl: false
fingerprint:
  url: ["/"]
  status: 401
  basic_auth_realm: "Router"
auth:
  type: basic
  credentials:
    - username: admin
      password: admin
  success:
    status: 200
"#;

    #[test]
    fn loads_valid_profile() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "router.yml", ROUTER_YML);

        let report = load(dir.path(), None, None);
        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.profiles[0].name, "Acme Router");
        assert_eq!(report.total_credentials(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn non_yml_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "router.yml", ROUTER_YML);
        write_profile(dir.path(), "README.md", "not a profile");

        let report = load(dir.path(), None, None);
        assert_eq!(report.profiles.len(), 1);
    }

    #[test]
    fn malformed_yaml_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "broken.yml", "not: [valid: yaml");
        write_profile(dir.path(), "router.yml", ROUTER_YML);

        let report = load(dir.path(), None, None);
        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].1, LoadError::Parse(..)));
    }

    #[test]
    fn duplicate_name_keeps_first_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "a/router.yml", ROUTER_YML);
        write_profile(dir.path(), "b/router.yml", ROUTER_YML);

        let report = load(dir.path(), None, None);
        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].1, LoadError::Duplicate { .. }));
    }

    #[test]
    fn filter_name_returns_singleton_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "router.yml", ROUTER_YML);

        let hit = load(dir.path(), Some("Acme Router"), None);
        assert_eq!(hit.profiles.len(), 1);

        let miss = load(dir.path(), Some("Nonexistent"), None);
        assert!(miss.profiles.is_empty());
    }

    #[test]
    fn filter_category_composes_with_name() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "router.yml", ROUTER_YML);

        let wrong_category = load(dir.path(), Some("Acme Router"), Some("printer"));
        assert!(wrong_category.profiles.is_empty());

        let right_category = load(dir.path(), Some("Acme Router"), Some("router"));
        assert_eq!(right_category.profiles.len(), 1);
    }

    #[test]
    fn schema_violation_is_skipped_with_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(
            dir.path(),
            "bad.yml",
            r#"
name: Bad Profile
fingerprint:
  url: []
auth:
  type: basic
  credentials: []
  success:
    status: 200
"#,
        );

        let report = load(dir.path(), None, None);
        assert!(report.profiles.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].1, LoadError::Schema { .. }));
    }
}

//! Success Evaluator: decides whether a probe response indicates a
//! successful login.

use crate::catalogue::Success;
use crate::http_client::ProbeOutcome;

/// `true` iff every declared constraint in `success` is satisfied by
/// `outcome`, checking status first and then the body regex, and only
/// ever narrowing from a match.
pub fn success(outcome: &ProbeOutcome, spec: &Success) -> bool {
    if let Some(status) = spec.status {
        if status != outcome.status {
            return false;
        }
    }

    if let Some(pattern) = &spec.body {
        let re = match regex::Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                log::error!("[success] invalid success.body regex {pattern:?}: {e}");
                return false;
            }
        };
        if !re.is_match(&outcome.body) {
            return false;
        }
    }

    true
}

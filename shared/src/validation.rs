//! Validation helpers for recipient lists and export settings

use std::sync::OnceLock;

use regex::Regex;

/// Strict shape accepted for report recipient addresses. Candidates that do
/// not match are dropped, they never fail a run.
const RECIPIENT_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn recipient_regex() -> &'static Regex {
    static RECIPIENT_RE: OnceLock<Regex> = OnceLock::new();
    RECIPIENT_RE.get_or_init(|| Regex::new(RECIPIENT_PATTERN).expect("recipient pattern compiles"))
}

/// Whole-string check of a single normalized address
pub fn is_valid_recipient(address: &str) -> bool {
    recipient_regex().is_match(address)
}

/// Merge the free-form multi-address field and the legacy single-address
/// field into one validated recipient list.
///
/// The multi field splits on commas, semicolons and newlines in any mix.
/// Every candidate is trimmed and lowercased before validation; invalid
/// candidates are dropped silently. Duplicates are removed case
/// insensitively, first occurrence wins, and the legacy address is
/// considered last.
pub fn resolve_recipients(multi: Option<&str>, legacy: Option<&str>) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    let candidates = multi
        .unwrap_or_default()
        .split(['\n', ',', ';'])
        .chain(legacy);

    for candidate in candidates {
        let address = candidate.trim().to_ascii_lowercase();
        if address.is_empty() || !is_valid_recipient(&address) {
            continue;
        }
        if !recipients.contains(&address) {
            recipients.push(address);
        }
    }
    recipients
}

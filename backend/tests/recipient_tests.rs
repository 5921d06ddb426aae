//! Recipient resolution property tests
//!
//! The resolver merges the free-form multi-address field with the legacy
//! single-address field. These properties hold for any input:
//! - Every resolved address is trimmed, lowercase and shape-valid
//! - No duplicates survive, compared case-insensitively
//! - First occurrence order is preserved, the legacy address merges last
//! - Invalid entries are dropped without affecting their neighbors

use proptest::prelude::*;

use shared::validation::{is_valid_recipient, resolve_recipients};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Distinct valid addresses, unique by construction
fn unique_addresses_strategy() -> impl Strategy<Value = Vec<String>> {
    (1usize..=6, "[a-z]{2,8}").prop_map(|(count, stem)| {
        (0..count)
            .map(|i| format!("{}{}@plant{}.example", stem, i, i))
            .collect()
    })
}

/// Separator tokens the multi field accepts, with stray whitespace
fn separators_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just(",".to_string()),
            Just(";".to_string()),
            Just("\n".to_string()),
            Just(", ".to_string()),
            Just(" ; ".to_string()),
            Just(" \n ".to_string()),
        ],
        1..=4,
    )
}

/// Strings that cannot be a recipient address
fn junk_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}",
        "[a-z]{1,6}@[a-z]{1,6}",
        Just("@".to_string()),
        Just("user@@plant.example".to_string()),
    ]
}

fn join_with(addresses: &[String], separators: &[String]) -> String {
    let mut out = String::new();
    for (i, address) in addresses.iter().enumerate() {
        if i > 0 {
            out.push_str(&separators[(i - 1) % separators.len()]);
        }
        out.push_str(address);
    }
    out
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Everything that comes out of the resolver is normalized and valid
    #[test]
    fn test_resolved_addresses_are_normalized_and_valid(
        addresses in unique_addresses_strategy(),
        separators in separators_strategy()
    ) {
        let multi = join_with(&addresses, &separators);
        let resolved = resolve_recipients(Some(&multi), None);

        for address in &resolved {
            prop_assert!(is_valid_recipient(address));
            prop_assert_eq!(address.clone(), address.trim().to_ascii_lowercase());
        }
    }

    /// Unique valid addresses survive in their input order
    #[test]
    fn test_order_is_preserved(
        addresses in unique_addresses_strategy(),
        separators in separators_strategy()
    ) {
        let multi = join_with(&addresses, &separators);
        let resolved = resolve_recipients(Some(&multi), None);
        prop_assert_eq!(resolved, addresses);
    }

    /// Resolution is idempotent: feeding its own output back changes nothing
    #[test]
    fn test_resolution_is_idempotent(
        addresses in unique_addresses_strategy(),
        separators in separators_strategy()
    ) {
        let multi = join_with(&addresses, &separators);
        let resolved = resolve_recipients(Some(&multi), None);
        let again = resolve_recipients(Some(&resolved.join(", ")), None);
        prop_assert_eq!(again, resolved);
    }

    /// Case differences never produce duplicates
    #[test]
    fn test_uppercased_input_resolves_identically(
        addresses in unique_addresses_strategy(),
        separators in separators_strategy()
    ) {
        let multi = join_with(&addresses, &separators);
        let shouting = multi.to_ascii_uppercase();
        prop_assert_eq!(
            resolve_recipients(Some(&shouting), None),
            resolve_recipients(Some(&multi), None)
        );
    }

    /// A new legacy address lands at the end; a duplicate one disappears
    #[test]
    fn test_legacy_merges_last(
        addresses in unique_addresses_strategy(),
        separators in separators_strategy()
    ) {
        let multi = join_with(&addresses, &separators);
        let legacy = "legacy@final.example".to_string();

        let mut expected = addresses.clone();
        expected.push(legacy.clone());
        prop_assert_eq!(
            resolve_recipients(Some(&multi), Some(&legacy)),
            expected
        );

        // Legacy duplicating the first multi entry adds nothing
        prop_assert_eq!(
            resolve_recipients(Some(&multi), Some(&addresses[0].to_ascii_uppercase())),
            addresses
        );
    }

    /// Junk mixed between valid entries never disturbs the valid ones
    #[test]
    fn test_junk_entries_are_dropped_silently(
        addresses in unique_addresses_strategy(),
        junk in junk_strategy()
    ) {
        let mut parts: Vec<String> = Vec::new();
        for address in &addresses {
            parts.push(junk.clone());
            parts.push(address.clone());
        }
        let multi = parts.join(",");
        prop_assert_eq!(resolve_recipients(Some(&multi), None), addresses);
    }
}

// ============================================================================
// Unit Tests: Rejection Edges
// ============================================================================

#[cfg(test)]
mod edge_tests {
    use super::*;

    #[test]
    fn test_non_ascii_addresses_are_rejected() {
        assert!(resolve_recipients(Some("usér@plant.example"), None).is_empty());
        assert!(resolve_recipients(Some("user@plánt.example"), None).is_empty());
    }

    #[test]
    fn test_consecutive_separators_yield_no_empty_entries() {
        let resolved = resolve_recipients(Some("a@x.example,,;\n,b@y.example"), None);
        assert_eq!(resolved, vec!["a@x.example", "b@y.example"]);
    }

    #[test]
    fn test_invalid_legacy_is_dropped() {
        let resolved = resolve_recipients(Some("a@x.example"), Some("not an address"));
        assert_eq!(resolved, vec!["a@x.example"]);
    }

    #[test]
    fn test_address_with_embedded_space_is_invalid() {
        assert!(!is_valid_recipient("user name@plant.example"));
        assert!(resolve_recipients(Some("user name@plant.example"), None).is_empty());
    }
}

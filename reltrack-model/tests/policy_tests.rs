use proptest::prelude::*;
use reltrack_model::{TrackingOptions, TrackingPolicy, VERSIONS_RELATION};

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn default_policy_excludes_versions() {
    let p = TrackingPolicy::default();
    assert!(p.only().is_empty());
    assert!(p.except().contains(VERSIONS_RELATION));
    assert!(!p.permits(VERSIONS_RELATION));
    assert!(p.permits("comments"));
}

// ── Registration accumulates ─────────────────────────────────────

#[test]
fn register_only_keeps_versions_excluded() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::only(["foobar"]));
    assert!(p.only().contains("foobar"));
    assert!(p.except().contains(VERSIONS_RELATION));
}

#[test]
fn register_except_unions_with_versions() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::except(["foobar"]));
    assert!(p.except().contains(VERSIONS_RELATION));
    assert!(p.except().contains("foobar"));
}

#[test]
fn repeated_registration_unions() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::only(["a"]));
    p.register(&TrackingOptions::only(["b"]));
    p.register(&TrackingOptions::only(["a"]));
    assert_eq!(p.only().len(), 2);
    assert!(p.permits("a"));
    assert!(p.permits("b"));
}

// ── Membership ───────────────────────────────────────────────────

#[test]
fn only_is_a_positive_filter() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::only(["many_documents"]));
    assert!(p.permits("many_documents"));
    assert!(!p.permits("one_related"));
}

#[test]
fn except_is_ignored_once_only_is_set() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::only(["x"]).and_except(["x"]));
    assert!(p.permits("x"));
}

#[test]
fn except_is_a_negative_filter() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::except(["many_documents"]));
    assert!(!p.permits("many_documents"));
    assert!(p.permits("one_related"));
}

// ── Deserialization ──────────────────────────────────────────────

#[test]
fn options_accept_single_string() {
    let o: TrackingOptions = serde_json::from_str(r#"{"only": "comments"}"#).unwrap();
    assert!(o.only.contains("comments"));
    assert!(o.except.is_empty());
}

#[test]
fn options_accept_list() {
    let o: TrackingOptions = serde_json::from_str(r#"{"except": ["a", "b"]}"#).unwrap();
    assert_eq!(o.except.len(), 2);
    assert!(o.only.is_empty());
}

#[test]
fn deserialized_policy_keeps_versions_excluded() {
    let p: TrackingPolicy = serde_json::from_str(r#"{"only": [], "except": []}"#).unwrap();
    assert!(!p.permits(VERSIONS_RELATION));
    assert!(p.except().contains(VERSIONS_RELATION));
}

#[test]
fn deserialized_policy_unions_onto_default() {
    let p: TrackingPolicy = serde_json::from_str(r#"{"except": "many_documents"}"#).unwrap();
    assert_eq!(
        p,
        TrackingPolicy::from(TrackingOptions::except(["many_documents"]))
    );
    assert!(!p.permits("many_documents"));
    assert!(!p.permits(VERSIONS_RELATION));
    assert!(p.permits("one_related"));
}

#[test]
fn serialized_policy_reads_back_unchanged() {
    let mut p = TrackingPolicy::default();
    p.register(&TrackingOptions::only(["many_documents"]));
    let json = serde_json::to_string(&p).unwrap();
    let back: TrackingPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

proptest! {
    #[test]
    fn registration_never_drops_names(
        first in prop::collection::btree_set("[a-z]{1,6}", 0..5),
        second in prop::collection::btree_set("[a-z]{1,6}", 0..5),
    ) {
        let mut p = TrackingPolicy::default();
        p.register(&TrackingOptions::except(first.clone()));
        p.register(&TrackingOptions::except(second.clone()));
        prop_assert!(p.except().contains(VERSIONS_RELATION));
        for name in first.iter().chain(second.iter()) {
            prop_assert!(p.except().contains(name));
        }
    }

    #[test]
    fn non_empty_only_decides_alone(
        only in prop::collection::btree_set("[a-z]{1,6}", 1..5),
        candidate in "[a-z]{1,6}",
    ) {
        let mut p = TrackingPolicy::default();
        p.register(&TrackingOptions::only(only.clone()).and_except([candidate.clone()]));
        prop_assert_eq!(p.permits(&candidate), only.contains(&candidate));
    }
}

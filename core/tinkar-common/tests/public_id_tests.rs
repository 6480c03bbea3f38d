use proptest::prelude::*;
use std::cmp::Ordering;
use std::str::FromStr;
use tinkar_common::{Error, PublicId};
use uuid::Uuid;

fn uuid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

// ── Construction ──────────────────────────────────────────────────

#[test]
fn new_sorts_and_dedups() {
    let id = PublicId::new([uuid(3), uuid(1), uuid(3), uuid(2)]).unwrap();
    assert_eq!(id.as_uuids(), &[uuid(1), uuid(2), uuid(3)]);
    assert_eq!(id.len(), 3);
    assert!(!id.is_empty());
}

#[test]
fn new_rejects_empty() {
    let err = PublicId::new(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::EmptyPublicId));
}

#[test]
fn from_uuid_holds_single_member() {
    let id = PublicId::from(uuid(7));
    assert_eq!(id.as_uuids(), &[uuid(7)]);
    assert!(id.contains(&uuid(7)));
    assert!(!id.contains(&uuid(8)));
}

// ── Merge equality ────────────────────────────────────────────────

#[test]
fn equal_when_sets_intersect() {
    let a = PublicId::new([uuid(1), uuid(2)]).unwrap();
    let b = PublicId::new([uuid(2), uuid(9)]).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, a);
}

#[test]
fn not_equal_when_disjoint() {
    let a = PublicId::new([uuid(1), uuid(2)]).unwrap();
    let b = PublicId::new([uuid(3), uuid(4)]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn equality_is_not_transitive() {
    let a = PublicId::new([uuid(1), uuid(2)]).unwrap();
    let b = PublicId::new([uuid(2), uuid(3)]).unwrap();
    let c = PublicId::new([uuid(3), uuid(4)]).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_ne!(a, c);
}

// ── Ordering ──────────────────────────────────────────────────────

#[test]
fn ordering_is_equal_for_intersecting_sets() {
    let a = PublicId::new([uuid(5), uuid(9)]).unwrap();
    let b = PublicId::new([uuid(1), uuid(9)]).unwrap();
    assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
}

#[test]
fn ordering_compares_sorted_arrays_when_disjoint() {
    let a = PublicId::new([uuid(1), uuid(5)]).unwrap();
    let b = PublicId::new([uuid(2)]).unwrap();
    assert!(a < b);
    assert!(b > a);
}

// ── Text form ─────────────────────────────────────────────────────

#[test]
fn display_and_parse_roundtrip() {
    let id = PublicId::new([uuid(10), uuid(4)]).unwrap();
    let text = id.to_string();
    assert!(text.starts_with('['));
    assert!(text.ends_with(']'));
    let parsed = PublicId::from_str(&text).unwrap();
    assert_eq!(parsed.as_uuids(), id.as_uuids());
}

#[test]
fn parse_invalid_uuid() {
    assert!(matches!(
        PublicId::parse("[not-a-uuid]"),
        Err(Error::InvalidUuid(_))
    ));
}

// ── Serde ─────────────────────────────────────────────────────────

#[test]
fn serializes_as_uuid_array() {
    let id = PublicId::new([uuid(2), uuid(1)]).unwrap();
    let json = serde_json::to_string(&id).unwrap();
    let uuids: Vec<Uuid> = serde_json::from_str(&json).unwrap();
    assert_eq!(uuids, vec![uuid(1), uuid(2)]);
}

#[test]
fn deserialize_rejects_empty_array() {
    assert!(serde_json::from_str::<PublicId>("[]").is_err());
}

#[test]
fn deserialize_sorts_members() {
    let json = format!("[\"{}\",\"{}\"]", uuid(9), uuid(3));
    let id: PublicId = serde_json::from_str(&json).unwrap();
    assert_eq!(id.as_uuids(), &[uuid(3), uuid(9)]);
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn members_are_always_sorted_and_unique(raw in prop::collection::vec(any::<u128>(), 1..16)) {
        let id = PublicId::new(raw.iter().copied().map(Uuid::from_u128)).unwrap();
        prop_assert!(id.as_uuids().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn equality_is_symmetric(
        a in prop::collection::vec(0u128..32, 1..6),
        b in prop::collection::vec(0u128..32, 1..6),
    ) {
        let a = PublicId::new(a.into_iter().map(Uuid::from_u128)).unwrap();
        let b = PublicId::new(b.into_iter().map(Uuid::from_u128)).unwrap();
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn intersection_matches_naive_scan(
        a in prop::collection::vec(0u128..32, 1..6),
        b in prop::collection::vec(0u128..32, 1..6),
    ) {
        let naive = a.iter().any(|x| b.contains(x));
        let a = PublicId::new(a.into_iter().map(Uuid::from_u128)).unwrap();
        let b = PublicId::new(b.into_iter().map(Uuid::from_u128)).unwrap();
        prop_assert_eq!(a.intersects(&b), naive);
    }
}

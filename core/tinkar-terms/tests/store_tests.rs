use std::thread;

use tinkar_terms::{
    FIRST_NID, MemoryPrimitiveData, PrimitiveData, PublicId, StoreError, UNRESOLVED_NID, term,
};
use uuid::Uuid;

fn uuid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn id(ns: &[u128]) -> PublicId {
    PublicId::new(ns.iter().map(|n| uuid(*n))).unwrap()
}

// ── Registration ─────────────────────────────────────────────────

#[test]
fn nids_start_at_first_nid() {
    let db = MemoryPrimitiveData::new();
    assert!(db.is_empty());
    let a = db.register(&id(&[1]), None, Some("a")).unwrap();
    let b = db.register(&id(&[2]), None, Some("b")).unwrap();
    assert_eq!(a, FIRST_NID);
    assert_eq!(b, FIRST_NID + 1);
    assert_eq!(db.len(), 2);
}

#[test]
fn registered_identity_is_returned() {
    let db = MemoryPrimitiveData::new();
    let nid = db.register(&id(&[7, 3]), None, Some("Heart")).unwrap();
    assert_eq!(db.public_id_for_nid(nid).unwrap().as_uuids(), &[uuid(3), uuid(7)]);
    assert_eq!(db.text_authoritative(nid).unwrap(), "Heart");
    assert_eq!(db.text_fast(nid).unwrap(), "Heart");
}

#[test]
fn register_terms_preserves_order() {
    let db = MemoryPrimitiveData::new();
    let nids = db.register_terms(term::ALL).unwrap();
    assert_eq!(nids.len(), term::ALL.len());
    assert!(nids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        db.nid_for_uuids(&[term::ACTIVE_STATE.primary_uuid()]).unwrap(),
        nids[11]
    );
}

// ── Lookup and assignment ────────────────────────────────────────

#[test]
fn any_shared_uuid_finds_the_entity() {
    let db = MemoryPrimitiveData::new();
    let nid = db.register(&id(&[1, 2]), None, None).unwrap();
    assert_eq!(db.nid_for_uuids(&[uuid(2)]).unwrap(), nid);
    assert_eq!(db.nid_for_uuids(&[uuid(9), uuid(1)]).unwrap(), nid);
}

#[test]
fn unseen_uuids_are_assigned_once() {
    let db = MemoryPrimitiveData::new();
    let first = db.nid_for_uuids(&[uuid(40)]).unwrap();
    let second = db.nid_for_uuids(&[uuid(40)]).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, UNRESOLVED_NID);
    assert_eq!(db.len(), 1);
}

#[test]
fn empty_uuids_are_rejected() {
    let db = MemoryPrimitiveData::new();
    assert!(matches!(db.nid_for_uuids(&[]), Err(StoreError::EmptyUuids)));
}

#[test]
fn overlapping_entities_are_ambiguous() {
    let db = MemoryPrimitiveData::new();
    db.register(&id(&[1]), None, None).unwrap();
    db.register(&id(&[1, 2]), None, None).unwrap();
    match db.nid_for_uuids(&[uuid(1)]) {
        Err(StoreError::Ambiguous { uuid: u, candidates }) => {
            assert_eq!(u, uuid(1));
            assert_eq!(candidates, 2);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn context_narrows_candidates() {
    let db = MemoryPrimitiveData::new();
    let concept_pattern = term::CONCEPT_PATTERN.public_id();
    let semantic_pattern = term::SEMANTIC_PATTERN.public_id();
    let concept = db.register(&id(&[1]), Some(&concept_pattern), None).unwrap();
    let semantic = db.register(&id(&[1]), Some(&semantic_pattern), None).unwrap();

    assert_eq!(db.nid_under_context(&id(&[1]), &concept_pattern).unwrap(), concept);
    assert_eq!(db.nid_under_context(&id(&[1]), &semantic_pattern).unwrap(), semantic);
    assert!(db.nid_for_uuids(&[uuid(1)]).is_err());
}

#[test]
fn context_falls_back_to_unscoped_match() {
    let db = MemoryPrimitiveData::new();
    let nid = db.register(&id(&[5]), None, None).unwrap();
    let pattern = term::STAMP_PATTERN.public_id();
    assert_eq!(db.nid_under_context(&id(&[5]), &pattern).unwrap(), nid);
}

#[test]
fn assignment_under_context_records_the_pattern() {
    let db = MemoryPrimitiveData::new();
    let pattern = term::CONCEPT_PATTERN.public_id();
    let scoped = db.nid_under_context(&id(&[8]), &pattern).unwrap();
    // A second, unscoped entity sharing the UUID does not disturb scoped lookup.
    db.register(&id(&[8]), None, None).unwrap();
    assert_eq!(db.nid_under_context(&id(&[8]), &pattern).unwrap(), scoped);
}

// ── Text ─────────────────────────────────────────────────────────

#[test]
fn fast_text_falls_back_to_uuid() {
    let db = MemoryPrimitiveData::new();
    let nid = db.register(&id(&[3]), None, None).unwrap();
    assert_eq!(db.text_fast(nid).unwrap(), uuid(3).to_string());
    assert!(matches!(db.text_authoritative(nid), Err(StoreError::NotFound(n)) if n == nid));
}

#[test]
fn unknown_nid_is_not_found() {
    let db = MemoryPrimitiveData::new();
    assert!(matches!(db.public_id_for_nid(17), Err(StoreError::NotFound(17))));
    assert!(matches!(db.text_fast(17), Err(StoreError::NotFound(17))));
}

// ── Accounting and concurrency ───────────────────────────────────

#[test]
fn stats_count_each_operation() {
    let db = MemoryPrimitiveData::new();
    let nid = db.register(&id(&[1]), None, Some("x")).unwrap();
    assert_eq!(db.stats().total(), 0);

    db.nid_for_uuids(&[uuid(1)]).unwrap();
    db.public_id_for_nid(nid).unwrap();
    db.text_fast(nid).unwrap();
    db.text_fast(nid).unwrap();
    let _ = db.text_authoritative(nid);

    let stats = db.stats();
    assert_eq!(stats.nid_for_uuids, 1);
    assert_eq!(stats.nid_under_context, 0);
    assert_eq!(stats.public_id_for_nid, 1);
    assert_eq!(stats.text_fast, 2);
    assert_eq!(stats.text_authoritative, 1);
    assert_eq!(stats.total(), 5);
}

#[test]
fn concurrent_first_sight_assigns_one_nid() {
    let db = MemoryPrimitiveData::new();
    let nids: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| db.nid_for_uuids(&[uuid(77)]).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(nids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(db.len(), 1);
}

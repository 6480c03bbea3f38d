use tinkar_terms::{MemoryPrimitiveData, PrimitiveData, State, StateLookup, term};

fn seeded() -> MemoryPrimitiveData {
    let db = MemoryPrimitiveData::new();
    db.register_terms(term::ALL).unwrap();
    db
}

// ── Reverse lookup ───────────────────────────────────────────────

#[test]
fn lookup_finds_every_state() {
    let db = seeded();
    let lookup = StateLookup::new();
    for state in State::ALL {
        let nid = state.term().proxy().nid(&db).unwrap();
        assert_eq!(lookup.from_concept_nid(&db, nid).unwrap(), Some(state));
    }
}

#[test]
fn unrelated_nid_is_not_a_state() {
    let db = seeded();
    let lookup = StateLookup::new();
    let status_value = term::STATUS_VALUE.proxy().nid(&db).unwrap();
    assert_eq!(lookup.from_concept_nid(&db, status_value).unwrap(), None);
    assert_eq!(lookup.from_concept_nid(&db, 987_654).unwrap(), None);
}

#[test]
fn table_is_built_once() {
    let db = seeded();
    let lookup = StateLookup::new();
    assert!(!lookup.is_built());

    let active = term::ACTIVE_STATE.proxy().nid(&db).unwrap();
    let before = db.stats().nid_under_context;

    lookup.from_concept_nid(&db, active).unwrap();
    let after_first = db.stats().nid_under_context;
    assert_eq!(after_first - before, State::ALL.len());
    assert!(lookup.is_built());

    lookup.from_concept_nid(&db, active).unwrap();
    lookup.from_concept_nid(&db, active + 1).unwrap();
    assert_eq!(db.stats().nid_under_context, after_first);
}

#[test]
fn lookups_are_per_store() {
    let first = seeded();
    let second = MemoryPrimitiveData::new();
    // Shift every nid in the second store.
    second
        .register(&tinkar_terms::PublicId::from(uuid::Uuid::from_u128(1)), None, None)
        .unwrap();
    second.register_terms(term::ALL).unwrap();

    let active_first = term::ACTIVE_STATE.proxy().nid(&first).unwrap();
    let active_second = term::ACTIVE_STATE.proxy().nid(&second).unwrap();
    assert_ne!(active_first, active_second);

    assert_eq!(
        StateLookup::new().from_concept_nid(&second, active_second).unwrap(),
        Some(State::Active)
    );
    assert_eq!(
        StateLookup::new().from_concept_nid(&first, active_first).unwrap(),
        Some(State::Active)
    );
}

#[test]
fn lookup_assigns_nids_in_an_empty_store() {
    let db = MemoryPrimitiveData::new();
    let lookup = StateLookup::new();
    assert_eq!(lookup.from_concept_nid(&db, 1).unwrap(), None);
    assert_eq!(db.len(), State::ALL.len());

    let withdrawn = db
        .nid_under_context(
            &term::WITHDRAWN_STATE.public_id(),
            &term::CONCEPT_PATTERN.public_id(),
        )
        .unwrap();
    assert_eq!(
        lookup.from_concept_nid(&db, withdrawn).unwrap(),
        Some(State::Withdrawn)
    );
}

// ── Names and serialization ──────────────────────────────────────

#[test]
fn names_and_display() {
    let names: Vec<_> = State::ALL.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        ["ACTIVE", "INACTIVE", "WITHDRAWN", "CANCELED", "PRIMORDIAL"]
    );
    assert_eq!(State::Canceled.to_string(), "CANCELED");
}

#[test]
fn from_name_ignores_case() {
    assert_eq!(State::from_name("active"), Some(State::Active));
    assert_eq!(State::from_name("Primordial"), Some(State::Primordial));
    assert_eq!(State::from_name("DORMANT"), None);
}

#[test]
fn only_active_is_active() {
    assert!(State::Active.is_active());
    assert!(State::ALL.iter().filter(|s| s.is_active()).count() == 1);
}

#[test]
fn terms_are_concepts_with_distinct_uuids() {
    let mut uuids: Vec<_> = State::ALL.iter().map(|s| s.term().primary_uuid()).collect();
    uuids.sort();
    uuids.dedup();
    assert_eq!(uuids.len(), State::ALL.len());
    assert_eq!(State::Active.term(), term::ACTIVE_STATE);
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(serde_json::to_string(&State::Withdrawn).unwrap(), "\"withdrawn\"");
    let state: State = serde_json::from_str("\"inactive\"").unwrap();
    assert_eq!(state, State::Inactive);
}

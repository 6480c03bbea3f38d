//! Backing store contract and an in-memory implementation.
//!
//! The store owns the authoritative mapping between public ids and nids.
//! Proxies never cache anything the store did not hand them, and every
//! resolution call receives the store explicitly.
//!
//! # Disambiguation
//!
//! The same UUID set can name entities of different families (a concept and
//! the semantic describing it, for example). [`PrimitiveData::nid_under_context`]
//! narrows the lookup to entities recorded under one field pattern; the context
//! is an ordinary argument so concurrent resolutions never observe each
//! other's scope.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};

use tinkar_common::PublicId;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::binding;
use crate::error::{StoreError, StoreResult};
use crate::term::Term;

/// First nid handed out by [`MemoryPrimitiveData`].
pub const FIRST_NID: i32 = i32::MIN + 1;

/// Lookups a proxy needs from the persistent identity store.
pub trait PrimitiveData: Send + Sync {
    /// Returns the nid of the single entity any of `uuids` names.
    fn nid_for_uuids(&self, uuids: &[Uuid]) -> StoreResult<i32>;

    /// Returns the nid for `public_id`, preferring entities recorded under
    /// the field pattern `pattern`.
    fn nid_under_context(&self, public_id: &PublicId, pattern: &PublicId) -> StoreResult<i32>;

    /// Returns the public id recorded for `nid`.
    fn public_id_for_nid(&self, nid: i32) -> StoreResult<PublicId>;

    /// Returns the authoritative text for `nid`.
    fn text_authoritative(&self, nid: i32) -> StoreResult<String>;

    /// Returns display text for `nid`; may be approximate.
    fn text_fast(&self, nid: i32) -> StoreResult<String>;
}

/// Number of calls made against each [`PrimitiveData`] operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStats {
    pub nid_for_uuids: usize,
    pub nid_under_context: usize,
    pub public_id_for_nid: usize,
    pub text_authoritative: usize,
    pub text_fast: usize,
}

impl LookupStats {
    /// Total calls across all operations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.nid_for_uuids
            + self.nid_under_context
            + self.public_id_for_nid
            + self.text_authoritative
            + self.text_fast
    }
}

#[derive(Default)]
struct Counters {
    nid_for_uuids: AtomicUsize,
    nid_under_context: AtomicUsize,
    public_id_for_nid: AtomicUsize,
    text_authoritative: AtomicUsize,
    text_fast: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

struct Record {
    public_id: PublicId,
    pattern: Option<PublicId>,
    text: Option<String>,
}

struct Tables {
    next_nid: i32,
    by_uuid: HashMap<Uuid, Vec<i32>>,
    records: HashMap<i32, Record>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            next_nid: FIRST_NID,
            by_uuid: HashMap::new(),
            records: HashMap::new(),
        }
    }
}

impl Tables {
    /// Distinct nids sharing any UUID with `uuids`, ascending.
    fn candidates(&self, uuids: &[Uuid]) -> Vec<i32> {
        let mut nids: Vec<i32> = uuids
            .iter()
            .filter_map(|uuid| self.by_uuid.get(uuid))
            .flatten()
            .copied()
            .collect();
        nids.sort_unstable();
        nids.dedup();
        nids
    }

    fn insert(
        &mut self,
        public_id: PublicId,
        pattern: Option<PublicId>,
        text: Option<String>,
    ) -> StoreResult<i32> {
        let nid = self.next_nid;
        let mut next = nid.checked_add(1).ok_or(StoreError::Exhausted)?;
        if next == 0 {
            next = 1;
        }
        self.next_nid = next;

        for uuid in public_id.as_uuids() {
            self.by_uuid.entry(*uuid).or_default().push(nid);
        }
        self.records.insert(
            nid,
            Record {
                public_id,
                pattern,
                text,
            },
        );
        Ok(nid)
    }

    fn record(&self, nid: i32) -> StoreResult<&Record> {
        self.records.get(&nid).ok_or(StoreError::NotFound(nid))
    }
}

/// In-memory [`PrimitiveData`] for tests, tools and small embedded datasets.
///
/// Nids are allocated upward from [`FIRST_NID`] and never equal 0. A UUID set
/// seen for the first time is assigned a fresh nid, as the persistent store
/// does on first sight.
#[derive(Default)]
pub struct MemoryPrimitiveData {
    tables: RwLock<Tables>,
    counters: Counters,
}

impl MemoryPrimitiveData {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new entity and returns its nid.
    ///
    /// Every call creates a distinct entity, even when UUIDs overlap an
    /// existing one; that is how ambiguous datasets are modelled.
    pub fn register(
        &self,
        public_id: &PublicId,
        pattern: Option<&PublicId>,
        text: Option<&str>,
    ) -> StoreResult<i32> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let nid = tables.insert(
            public_id.clone(),
            pattern.cloned(),
            text.map(str::to_string),
        )?;
        debug!(nid, public_id = %public_id, "registered entity");
        Ok(nid)
    }

    /// Records a well-known term under its family's field pattern.
    pub fn register_term(&self, term: &Term) -> StoreResult<i32> {
        let pattern = binding::binding_for(term.kind()).pattern.public_id();
        self.register(&term.public_id(), Some(&pattern), Some(term.description()))
    }

    /// Records every term, returning their nids in order.
    pub fn register_terms<'a>(
        &self,
        terms: impl IntoIterator<Item = &'a Term>,
    ) -> StoreResult<Vec<i32>> {
        terms.into_iter().map(|term| self.register_term(term)).collect()
    }

    /// Number of entities recorded; counts through a poisoned lock.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    /// Returns true if no entity has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of how many lookups each operation has served.
    pub fn stats(&self) -> LookupStats {
        let load = |c: &AtomicUsize| c.load(Ordering::Relaxed);
        LookupStats {
            nid_for_uuids: load(&self.counters.nid_for_uuids),
            nid_under_context: load(&self.counters.nid_under_context),
            public_id_for_nid: load(&self.counters.public_id_for_nid),
            text_authoritative: load(&self.counters.text_authoritative),
            text_fast: load(&self.counters.text_fast),
        }
    }

    fn pick(uuids: &[Uuid], candidates: &[i32]) -> StoreResult<Option<i32>> {
        match candidates {
            [] => Ok(None),
            [nid] => Ok(Some(*nid)),
            many => Err(StoreError::Ambiguous {
                uuid: uuids[0],
                candidates: many.len(),
            }),
        }
    }

    /// Shared lookup-or-assign path; `pattern` is recorded on assignment.
    fn resolve(&self, uuids: &[Uuid], pattern: Option<&PublicId>) -> StoreResult<i32> {
        if uuids.is_empty() {
            return Err(StoreError::EmptyUuids);
        }

        {
            let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
            if let Some(nid) = Self::choose(&tables, uuids, pattern)? {
                trace!(nid, "resolved existing entity");
                return Ok(nid);
            }
        }

        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        // Another writer may have assigned it between the two locks.
        if let Some(nid) = Self::choose(&tables, uuids, pattern)? {
            return Ok(nid);
        }
        let public_id = PublicId::new(uuids.iter().copied()).map_err(|_| StoreError::EmptyUuids)?;
        let nid = tables.insert(public_id, pattern.cloned(), None)?;
        debug!(nid, "assigned nid to unseen UUIDs");
        Ok(nid)
    }

    fn choose(
        tables: &Tables,
        uuids: &[Uuid],
        pattern: Option<&PublicId>,
    ) -> StoreResult<Option<i32>> {
        let candidates = tables.candidates(uuids);
        if let Some(pattern) = pattern {
            let scoped: Vec<i32> = candidates
                .iter()
                .copied()
                .filter(|nid| {
                    tables.records.get(nid).is_some_and(|r| {
                        r.pattern.as_ref().is_some_and(|p| p == pattern)
                    })
                })
                .collect();
            if !scoped.is_empty() {
                return Self::pick(uuids, &scoped);
            }
        }
        Self::pick(uuids, &candidates)
    }
}

impl PrimitiveData for MemoryPrimitiveData {
    fn nid_for_uuids(&self, uuids: &[Uuid]) -> StoreResult<i32> {
        Counters::bump(&self.counters.nid_for_uuids);
        self.resolve(uuids, None)
    }

    fn nid_under_context(&self, public_id: &PublicId, pattern: &PublicId) -> StoreResult<i32> {
        Counters::bump(&self.counters.nid_under_context);
        self.resolve(public_id.as_uuids(), Some(pattern))
    }

    fn public_id_for_nid(&self, nid: i32) -> StoreResult<PublicId> {
        Counters::bump(&self.counters.public_id_for_nid);
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.record(nid)?.public_id.clone())
    }

    fn text_authoritative(&self, nid: i32) -> StoreResult<String> {
        Counters::bump(&self.counters.text_authoritative);
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        tables
            .record(nid)?
            .text
            .clone()
            .ok_or(StoreError::NotFound(nid))
    }

    fn text_fast(&self, nid: i32) -> StoreResult<String> {
        Counters::bump(&self.counters.text_fast);
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        let record = tables.record(nid)?;
        Ok(match &record.text {
            Some(text) => text.clone(),
            None => record.public_id.as_uuids()[0].to_string(),
        })
    }
}

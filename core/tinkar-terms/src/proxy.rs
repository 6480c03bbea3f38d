//! Lazily resolved entity proxies.
//!
//! A proxy starts from whichever identity form its creator had at hand: a nid
//! from the store, or UUIDs (optionally with a description) from source data.
//! The missing forms are fetched from the backing store on first use and
//! published once. Clones share one state, so a nid resolved through any
//! clone is visible to all of them.
//!
//! Every fill is idempotent: two threads racing on the first call may both
//! query the store, but they publish the same value and the loser adopts the
//! winner's. The nid lives in an atomic word (0 = unresolved) and the other
//! forms in `OnceLock`s, so publication is always a single atomic step.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{self, AtomicI32};
use std::sync::{Arc, OnceLock};

use tinkar_common::{PublicId, uuid_list};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{Error, PrimitiveData, ProxyKind, Result, binding};

/// Nid value meaning "not yet resolved". Never a legitimate nid.
pub const UNRESOLVED_NID: i32 = 0;

/// A value that already carries a resolved nid.
pub trait HasNid {
    fn nid(&self) -> i32;
}

/// A value that can report its public id without a store.
pub trait HasPublicId {
    fn public_id(&self) -> PublicId;
}

/// Right-hand side of [`EntityProxy::eq_with`].
#[derive(Clone, Copy)]
pub enum Comparand<'a> {
    Proxy(&'a EntityProxy),
    Nid(&'a dyn HasNid),
    PublicId(&'a PublicId),
    Component(&'a dyn HasPublicId),
}

impl<'a> From<&'a EntityProxy> for Comparand<'a> {
    fn from(proxy: &'a EntityProxy) -> Self {
        Self::Proxy(proxy)
    }
}

impl<'a> From<&'a PublicId> for Comparand<'a> {
    fn from(public_id: &'a PublicId) -> Self {
        Self::PublicId(public_id)
    }
}

#[derive(Debug)]
struct ProxyState {
    nid: AtomicI32,
    uuids: OnceLock<Box<[Uuid]>>,
    description: OnceLock<String>,
}

/// Reference to a concept, pattern, semantic, stamp, or untyped entity.
#[derive(Debug, Clone)]
pub struct EntityProxy {
    kind: ProxyKind,
    state: Arc<ProxyState>,
}

impl EntityProxy {
    fn build(
        kind: ProxyKind,
        nid: i32,
        uuids: Option<Box<[Uuid]>>,
        description: Option<String>,
    ) -> Self {
        let state = ProxyState {
            nid: AtomicI32::new(nid),
            uuids: uuids.map(OnceLock::from).unwrap_or_default(),
            description: description.map(OnceLock::from).unwrap_or_default(),
        };
        Self {
            kind,
            state: Arc::new(state),
        }
    }

    fn sorted(uuids: &[Uuid]) -> Option<Box<[Uuid]>> {
        if uuids.is_empty() {
            return None;
        }
        let mut sorted = uuids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        Some(sorted.into_boxed_slice())
    }

    // ── Construction ─────────────────────────────────────────────

    /// Proxy for a known nid; identity is fetched on demand.
    #[must_use]
    pub fn from_nid(kind: ProxyKind, nid: i32) -> Self {
        Self::build(kind, nid, None, None)
    }

    /// Proxy for known UUIDs and description; the nid is fetched on demand.
    ///
    /// UUIDs are sorted and deduplicated so that array equality is a valid
    /// identity shortcut.
    #[must_use]
    pub fn from_uuids(kind: ProxyKind, description: &str, uuids: &[Uuid]) -> Self {
        Self::build(
            kind,
            UNRESOLVED_NID,
            Self::sorted(uuids),
            Some(description.to_string()),
        )
    }

    /// Proxy for known UUIDs without a description.
    #[must_use]
    pub fn from_uuids_only(kind: ProxyKind, uuids: &[Uuid]) -> Self {
        Self::build(kind, UNRESOLVED_NID, Self::sorted(uuids), None)
    }

    /// Proxy for a public id and description.
    #[must_use]
    pub fn from_public_id(kind: ProxyKind, description: &str, public_id: &PublicId) -> Self {
        // PublicId is already sorted and unique.
        Self::build(
            kind,
            UNRESOLVED_NID,
            Some(public_id.as_uuids().into()),
            Some(description.to_string()),
        )
    }

    #[must_use]
    pub fn concept_from_nid(nid: i32) -> Self {
        Self::from_nid(ProxyKind::Concept, nid)
    }

    #[must_use]
    pub fn pattern_from_nid(nid: i32) -> Self {
        Self::from_nid(ProxyKind::Pattern, nid)
    }

    #[must_use]
    pub fn semantic_from_nid(nid: i32) -> Self {
        Self::from_nid(ProxyKind::Semantic, nid)
    }

    #[must_use]
    pub fn stamp_from_nid(nid: i32) -> Self {
        Self::from_nid(ProxyKind::Stamp, nid)
    }

    #[must_use]
    pub fn entity(description: &str, uuids: &[Uuid]) -> Self {
        Self::from_uuids(ProxyKind::Entity, description, uuids)
    }

    #[must_use]
    pub fn concept(description: &str, uuids: &[Uuid]) -> Self {
        Self::from_uuids(ProxyKind::Concept, description, uuids)
    }

    #[must_use]
    pub fn pattern(description: &str, uuids: &[Uuid]) -> Self {
        Self::from_uuids(ProxyKind::Pattern, description, uuids)
    }

    #[must_use]
    pub fn semantic(description: &str, uuids: &[Uuid]) -> Self {
        Self::from_uuids(ProxyKind::Semantic, description, uuids)
    }

    #[must_use]
    pub fn stamp(description: &str, uuids: &[Uuid]) -> Self {
        Self::from_uuids(ProxyKind::Stamp, description, uuids)
    }

    // ── Inspection without the store ─────────────────────────────

    #[must_use]
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// The nid, if already resolved.
    #[must_use]
    pub fn known_nid(&self) -> Option<i32> {
        match self.state.nid.load(atomic::Ordering::Acquire) {
            UNRESOLVED_NID => None,
            nid => Some(nid),
        }
    }

    /// The sorted UUIDs, if already present.
    #[must_use]
    pub fn known_uuids(&self) -> Option<&[Uuid]> {
        self.state.uuids.get().map(|uuids| &**uuids)
    }

    /// The cached description, if already present.
    #[must_use]
    pub fn known_description(&self) -> Option<&str> {
        self.state.description.get().map(String::as_str)
    }

    /// True if both handles share one state (reference equality).
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    // ── Lazy resolution ──────────────────────────────────────────

    /// Returns the nid, resolving and caching it on first use.
    ///
    /// Concept proxies resolve under the concept field pattern, since a UUID
    /// set may also name a semantic or other entity in the same dataset.
    pub fn nid(&self, db: &dyn PrimitiveData) -> Result<i32> {
        if let Some(nid) = self.known_nid() {
            trace!(nid, "nid cache hit");
            return Ok(nid);
        }

        let uuids = self.known_uuids().ok_or(Error::UnresolvedIdentity)?;
        let resolved = match self.kind {
            ProxyKind::Concept => {
                let public_id = PublicId::new(uuids.iter().copied())?;
                let context = binding::concept::BINDING.pattern.public_id();
                db.nid_under_context(&public_id, &context)?
            }
            _ => db.nid_for_uuids(uuids)?,
        };
        debug!(kind = %self.kind, nid = resolved, "resolved nid");

        match self.state.nid.compare_exchange(
            UNRESOLVED_NID,
            resolved,
            atomic::Ordering::AcqRel,
            atomic::Ordering::Acquire,
        ) {
            Ok(_) => Ok(resolved),
            Err(published) => Ok(published),
        }
    }

    /// Returns the sorted UUIDs, fetching them by nid on first use.
    pub fn uuids(&self, db: &dyn PrimitiveData) -> Result<&[Uuid]> {
        if let Some(uuids) = self.known_uuids() {
            return Ok(uuids);
        }

        let nid = self.known_nid().ok_or(Error::UnresolvedIdentity)?;
        let public_id = db.public_id_for_nid(nid)?;
        debug!(nid, public_id = %public_id, "resolved uuids");
        let uuids: &[Uuid] = self
            .state
            .uuids
            .get_or_init(|| public_id.as_uuids().into());
        Ok(uuids)
    }

    pub fn public_id(&self, db: &dyn PrimitiveData) -> Result<PublicId> {
        Ok(PublicId::new(self.uuids(db)?.iter().copied())?)
    }

    /// Returns display text, caching the store's fast lookup on first use.
    pub fn description(&self, db: &dyn PrimitiveData) -> Result<&str> {
        if let Some(description) = self.known_description() {
            return Ok(description);
        }

        let text = db.text_fast(self.nid(db)?)?;
        Ok(self.state.description.get_or_init(|| text).as_str())
    }

    /// Authoritative text from the store; never cached.
    pub fn text(&self, db: &dyn PrimitiveData) -> Result<String> {
        Ok(db.text_authoritative(self.nid(db)?)?)
    }

    // ── Identity contract ────────────────────────────────────────

    /// Tests whether `other` names the same entity.
    ///
    /// Checks, in order: shared state; two unresolved proxies by exact UUID
    /// array; two proxies by nid; a nid-bearing value by nid; a public id or
    /// component by public id merge equality. Kind is not compared.
    pub fn eq_with<'a>(
        &self,
        db: &dyn PrimitiveData,
        other: impl Into<Comparand<'a>>,
    ) -> Result<bool> {
        match other.into() {
            Comparand::Proxy(other) => {
                if self.same_instance(other) {
                    return Ok(true);
                }
                if self.known_nid().is_none() && other.known_nid().is_none() {
                    if let (Some(a), Some(b)) = (self.known_uuids(), other.known_uuids()) {
                        return Ok(a == b);
                    }
                }
                Ok(self.nid(db)? == other.nid(db)?)
            }
            Comparand::Nid(value) => Ok(self.nid(db)? == value.nid()),
            Comparand::PublicId(public_id) => Ok(self.public_id(db)? == *public_id),
            Comparand::Component(component) => {
                Ok(self.public_id(db)? == component.public_id())
            }
        }
    }

    /// Feeds the resolved nid to `state`; resolves the nid if needed.
    pub fn hash_with<H: Hasher>(&self, db: &dyn PrimitiveData, state: &mut H) -> Result<()> {
        self.nid(db)?.hash(state);
        Ok(())
    }

    /// Hash of the resolved nid.
    pub fn hash_code(&self, db: &dyn PrimitiveData) -> Result<u64> {
        let mut hasher = DefaultHasher::new();
        self.hash_with(db, &mut hasher)?;
        Ok(hasher.finish())
    }

    /// Orders by public id.
    pub fn cmp_with(&self, db: &dyn PrimitiveData, other: &Self) -> Result<Ordering> {
        let a = self.public_id(db)?;
        let b = other.public_id(db)?;
        Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
    }
}

impl fmt::Display for EntityProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.kind.label())?;
        let mut sep = "";
        if let Some(description) = self.known_description() {
            write!(f, "{description}")?;
            sep = " ";
        }
        if let Some(nid) = self.known_nid() {
            write!(f, "{sep}<{nid}>")?;
            sep = " ";
        }
        if let Some(uuids) = self.known_uuids() {
            write!(f, "{sep}{}", uuid_list::format(uuids))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn empty_uuid_slice_leaves_identity_unseeded() {
        let proxy = EntityProxy::concept("nothing", &[]);
        assert!(proxy.known_uuids().is_none());
        assert!(proxy.known_nid().is_none());
    }

    #[test]
    fn display_shows_only_known_parts() {
        let proxy = EntityProxy::concept("Foo", &[uuid(1)]);
        assert_eq!(proxy.to_string(), format!("Concept{{Foo [{}]}}", uuid(1)));

        let proxy = EntityProxy::stamp_from_nid(-7);
        assert_eq!(proxy.to_string(), "Stamp{<-7>}");
    }

    #[test]
    fn clones_share_state() {
        let a = EntityProxy::pattern_from_nid(5);
        let b = a.clone();
        assert!(a.same_instance(&b));
        assert!(!a.same_instance(&EntityProxy::pattern_from_nid(5)));
    }
}

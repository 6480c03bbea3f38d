//! Public identifiers for terminology entities.
//!
//! A `PublicId` is the merge-tolerant identity of an entity: when two entities
//! are merged their UUID sets are unioned, so any shared UUID means "same
//! entity". Equality is therefore set intersection, not set equality.

use crate::{Error, Result, uuid_list};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Ordered, deduplicated, non-empty set of UUIDs naming one logical entity.
///
/// Only `PartialEq` and `PartialOrd` are implemented; intersection equality
/// is not transitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Uuid>", into = "Vec<Uuid>")]
pub struct PublicId(Box<[Uuid]>);

impl PublicId {
    /// Creates a public id from any UUIDs, sorting and deduplicating them.
    pub fn new(uuids: impl IntoIterator<Item = Uuid>) -> Result<Self> {
        let mut uuids: Vec<Uuid> = uuids.into_iter().collect();
        if uuids.is_empty() {
            return Err(Error::EmptyPublicId);
        }
        uuids.sort_unstable();
        uuids.dedup();
        Ok(Self(uuids.into_boxed_slice()))
    }

    /// Creates a public id holding a single UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(Box::new([uuid]))
    }

    /// Creates a public id from a primary UUID plus any alternates.
    #[must_use]
    pub fn with_alternates(primary: Uuid, alternates: &[Uuid]) -> Self {
        let mut uuids = Vec::with_capacity(1 + alternates.len());
        uuids.push(primary);
        uuids.extend_from_slice(alternates);
        uuids.sort_unstable();
        uuids.dedup();
        Self(uuids.into_boxed_slice())
    }

    /// Returns the UUIDs in ascending order.
    #[must_use]
    pub fn as_uuids(&self) -> &[Uuid] {
        &self.0
    }

    /// Returns the number of UUIDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `uuid` is one of this id's UUIDs.
    #[must_use]
    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.0.binary_search(uuid).is_ok()
    }

    /// Returns true if the two UUID sets share at least one member.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Parses a public id from its UUID-list text form.
    pub fn parse(s: &str) -> Result<Self> {
        Self::new(uuid_list::parse(s)?)
    }

    /// Returns the canonical UUID-list text form.
    #[must_use]
    pub fn to_uuid_string(&self) -> String {
        uuid_list::format(&self.0)
    }
}

impl PartialEq for PublicId {
    fn eq(&self, other: &Self) -> bool {
        self.intersects(other)
    }
}

impl PartialOrd for PublicId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.intersects(other) {
            Some(Ordering::Equal)
        } else {
            Some(self.0.cmp(&other.0))
        }
    }
}

impl From<Uuid> for PublicId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl TryFrom<Vec<Uuid>> for PublicId {
    type Error = Error;

    fn try_from(uuids: Vec<Uuid>) -> Result<Self> {
        Self::new(uuids)
    }
}

impl From<PublicId> for Vec<Uuid> {
    fn from(id: PublicId) -> Self {
        id.0.into_vec()
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uuid_string())
    }
}

impl FromStr for PublicId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

//! Well-known terms referenced directly by code.
//!
//! A [`Term`] is a compile-time seed, not a proxy: each call to
//! [`Term::proxy`] builds a fresh proxy whose caches belong to the caller.
//! Keeping constants free of cached nids means two stores in one process
//! never see each other's handles.

use tinkar_common::PublicId;
use uuid::{Uuid, uuid};

use crate::{EntityProxy, ProxyKind};

/// Compile-time identity of a well-known entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    kind: ProxyKind,
    description: &'static str,
    uuid: Uuid,
    alternates: &'static [Uuid],
}

impl Term {
    /// Declares a term with a single UUID.
    #[must_use]
    pub const fn new(kind: ProxyKind, description: &'static str, uuid: Uuid) -> Self {
        Self {
            kind,
            description,
            uuid,
            alternates: &[],
        }
    }

    /// Declares a term that kept additional UUIDs from merged sources.
    #[must_use]
    pub const fn with_alternates(
        kind: ProxyKind,
        description: &'static str,
        uuid: Uuid,
        alternates: &'static [Uuid],
    ) -> Self {
        Self {
            kind,
            description,
            uuid,
            alternates,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ProxyKind {
        self.kind
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// The UUID the term was first published under.
    #[must_use]
    pub const fn primary_uuid(&self) -> Uuid {
        self.uuid
    }

    #[must_use]
    pub fn public_id(&self) -> PublicId {
        PublicId::with_alternates(self.uuid, self.alternates)
    }

    /// Builds a new unresolved proxy for this term.
    #[must_use]
    pub fn proxy(&self) -> EntityProxy {
        EntityProxy::from_public_id(self.kind, self.description, &self.public_id())
    }
}

const fn concept(description: &'static str, uuid: Uuid) -> Term {
    Term::new(ProxyKind::Concept, description, uuid)
}

const fn pattern(description: &'static str, uuid: Uuid) -> Term {
    Term::new(ProxyKind::Pattern, description, uuid)
}

// ── Field patterns ───────────────────────────────────────────────

pub const COMPONENT_PATTERN: Term =
    pattern("Component pattern", uuid!("54434a3c-3ffa-4058-9338-451364fea130"));
pub const COMPONENT_VERSION_PATTERN: Term = pattern(
    "Component version pattern",
    uuid!("d9ce3691-d19a-4342-b2a2-8a5cc958d81e"),
);
pub const CONCEPT_PATTERN: Term =
    pattern("Concept pattern", uuid!("a11eefc9-ae81-4539-a4d0-0990611443ec"));
pub const CONCEPT_VERSION_PATTERN: Term = pattern(
    "Concept version pattern",
    uuid!("9db47ec3-edea-4974-9696-372ae8a19952"),
);
pub const PATTERN_PATTERN: Term =
    pattern("Pattern pattern", uuid!("d7791f2f-dbb3-4656-b581-94d7e1f6da2c"));
pub const PATTERN_VERSION_PATTERN: Term = pattern(
    "Pattern version pattern",
    uuid!("24dec0ff-e66e-4dcd-8409-a95eafcd06c0"),
);
pub const SEMANTIC_PATTERN: Term =
    pattern("Semantic pattern", uuid!("af62195f-35a7-413e-b13f-fadd28a61a15"));
pub const SEMANTIC_VERSION_PATTERN: Term = pattern(
    "Semantic version pattern",
    uuid!("9f0a2b01-70dd-40f6-8e23-f0efd631c2ba"),
);
pub const STAMP_PATTERN: Term =
    pattern("Stamp pattern", uuid!("6b560284-ae83-4dd7-9ad6-b007b4b5e21e"));
pub const STAMP_VERSION_PATTERN: Term = pattern(
    "Stamp version pattern",
    uuid!("3c7a9c74-7fd4-47b1-bc3b-bfdc2e3a5d99"),
);

// ── Status values ────────────────────────────────────────────────

pub const STATUS_VALUE: Term =
    concept("Status value", uuid!("a9376f2a-f6ca-4b9e-b738-990735343144"));
pub const ACTIVE_STATE: Term =
    concept("Active state", uuid!("390aca7e-ec8d-4484-bd0b-7d0d9219347c"));
pub const INACTIVE_STATE: Term =
    concept("Inactive state", uuid!("f1e0ed62-3ecd-4bc9-8952-6d89ad23824e"));
pub const WITHDRAWN_STATE: Term =
    concept("Withdrawn state", uuid!("a8ab3131-4b9b-492e-ad26-967925cb806f"));
pub const CANCELED_STATE: Term =
    concept("Canceled state", uuid!("53623064-958e-44df-95ec-e2ce5e2bbf80"));
pub const PRIMORDIAL_STATE: Term =
    concept("Primordial state", uuid!("efbbfa80-6368-4cc6-9c0e-d33199fc1b22"));

/// Every term declared in this module.
pub const ALL: &[Term] = &[
    COMPONENT_PATTERN,
    COMPONENT_VERSION_PATTERN,
    CONCEPT_PATTERN,
    CONCEPT_VERSION_PATTERN,
    PATTERN_PATTERN,
    PATTERN_VERSION_PATTERN,
    SEMANTIC_PATTERN,
    SEMANTIC_VERSION_PATTERN,
    STAMP_PATTERN,
    STAMP_VERSION_PATTERN,
    STATUS_VALUE,
    ACTIVE_STATE,
    INACTIVE_STATE,
    WITHDRAWN_STATE,
    CANCELED_STATE,
    PRIMORDIAL_STATE,
];

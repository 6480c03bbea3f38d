//! Capabilities that let arbitrary entity values be normalized into proxies.

use crate::proxy::UNRESOLVED_NID;
use crate::{EntityProxy, ProxyKind};

/// One of the four typed entity capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Concept,
    Pattern,
    Semantic,
    Stamp,
}

impl Capability {
    /// Proxy kind carrying this capability.
    #[must_use]
    pub const fn kind(self) -> ProxyKind {
        match self {
            Self::Concept => ProxyKind::Concept,
            Self::Pattern => ProxyKind::Pattern,
            Self::Semantic => ProxyKind::Semantic,
            Self::Stamp => ProxyKind::Stamp,
        }
    }

    /// Capability of a proxy kind; the untyped kind has none.
    #[must_use]
    pub const fn of(kind: ProxyKind) -> Option<Self> {
        match kind {
            ProxyKind::Entity => None,
            ProxyKind::Concept => Some(Self::Concept),
            ProxyKind::Pattern => Some(Self::Pattern),
            ProxyKind::Semantic => Some(Self::Semantic),
            ProxyKind::Stamp => Some(Self::Stamp),
        }
    }
}

/// Any loaded entity, version, or reference that can stand for an entity.
///
/// Implementors other than [`EntityProxy`] are expected to hold a resolved
/// nid, as entities loaded from the store do.
pub trait EntityFacade {
    /// Resolved nid of the entity.
    fn nid(&self) -> i32;

    /// Which typed capability the value exposes, if any.
    fn capability(&self) -> Option<Capability>;

    /// The value itself when it already is a proxy.
    fn as_proxy(&self) -> Option<&EntityProxy> {
        None
    }
}

impl EntityFacade for EntityProxy {
    fn nid(&self) -> i32 {
        self.known_nid().unwrap_or(UNRESOLVED_NID)
    }

    fn capability(&self) -> Option<Capability> {
        Capability::of(self.kind())
    }

    fn as_proxy(&self) -> Option<&EntityProxy> {
        Some(self)
    }
}

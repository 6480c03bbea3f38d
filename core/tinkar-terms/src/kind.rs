//! The closed set of entity kinds a proxy can stand for.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Entity kind carried by every [`EntityProxy`](crate::EntityProxy).
///
/// `Entity` is the untyped form: an identity whose kind is not known to the
/// holder. The other four are the capability-bearing kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    Entity,
    Concept,
    Pattern,
    Semantic,
    Stamp,
}

impl ProxyKind {
    /// All kinds, untyped first.
    pub const ALL: [ProxyKind; 5] = [
        Self::Entity,
        Self::Concept,
        Self::Pattern,
        Self::Semantic,
        Self::Stamp,
    ];

    /// XML fragment tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Concept => "concept",
            Self::Pattern => "pattern",
            Self::Semantic => "semantic",
            Self::Stamp => "stamp",
        }
    }

    /// Kind for an XML fragment tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| Error::UnknownFragmentTag(tag.to_string()))
    }

    /// Human readable name, used by `Display` for proxies.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entity => "Entity",
            Self::Concept => "Concept",
            Self::Pattern => "Pattern",
            Self::Semantic => "Semantic",
            Self::Stamp => "Stamp",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProxyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(&s.to_ascii_lowercase())
    }
}

//! Error types for proxy resolution and the proxy codecs.

use thiserror::Error;
use uuid::Uuid;

/// Result type for proxy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for backing store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while resolving or (de)serializing proxies.
#[derive(Debug, Error)]
pub enum Error {
    /// The proxy was built with neither a nid nor any UUIDs.
    #[error("proxy has neither a nid nor UUIDs to resolve from")]
    UnresolvedIdentity,

    /// A decoded enum member is now bound to a different concept.
    #[error("enum drift for {member}: bound to {expected}, record holds {found}")]
    EnumDrift {
        member: String,
        expected: String,
        found: String,
    },

    /// XML fragment root is not one of the known proxy tags.
    #[error("unknown fragment tag: {0}")]
    UnknownFragmentTag(String),

    /// Value exposes none of the concept, pattern, semantic or stamp capabilities.
    #[error("value has no concept, pattern, semantic or stamp capability")]
    UnsupportedCapability,

    /// Binary record carries a version tag this build does not know.
    #[error("unsupported record version: {0}")]
    UnsupportedVersion(u64),

    /// Binary record ended before a complete field was read.
    #[error("record truncated")]
    Truncated,

    /// Binary record has bytes left after the last field.
    #[error("record has {0} trailing bytes")]
    TrailingBytes(usize),

    /// A varint ran past the ten bytes a `u64` can occupy.
    #[error("malformed varint")]
    MalformedVarint,

    /// A length-prefixed string was not valid UTF-8.
    #[error("record string is not valid UTF-8")]
    InvalidUtf8,

    /// Any other failure of the record codec.
    #[error("record codec error: {0}")]
    Codec(postcard::Error),

    /// Decoded name matches no member of the enum.
    #[error("{enum_name} has no member named {name}")]
    UnknownMember { enum_name: &'static str, name: String },

    /// Fragment is well-formed XML but not a proxy fragment.
    #[error("invalid fragment: {0}")]
    Fragment(String),

    /// Fragment is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UUID or UUID-list parsing error.
    #[error(transparent)]
    Common(#[from] tinkar_common::Error),

    /// Backing store call failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}

/// Errors reported by a [`PrimitiveData`](crate::PrimitiveData) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entity is registered under this nid.
    #[error("no entity for nid {0}")]
    NotFound(i32),

    /// A UUID names more than one entity and no context picked one.
    #[error("UUID {uuid} matches {candidates} entities")]
    Ambiguous { uuid: Uuid, candidates: usize },

    /// Lookup was asked for an empty UUID set.
    #[error("no UUIDs to look up")]
    EmptyUuids,

    /// Every nid in the store's range has been handed out.
    #[error("nid space exhausted")]
    Exhausted,

    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

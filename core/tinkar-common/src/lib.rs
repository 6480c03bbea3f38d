//! Identity primitives shared by the Tinkar terminology crates.
//!
//! This crate defines the globally stable side of entity identity:
//! - [`PublicId`], an ordered set of UUIDs any of which names the same entity
//! - the canonical text form of a UUID set ([`uuid_list`])
//!
//! Process-local handles (nids) and everything that resolves between the two
//! forms live in `tinkar-terms`.

mod public_id;
pub mod uuid_list;

pub use public_id::PublicId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or parsing identities.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("public id must contain at least one UUID")]
    EmptyPublicId,

    #[error("invalid UUID list: {0}")]
    InvalidUuidList(String),
}

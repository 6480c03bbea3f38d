//! Canonical text form of a UUID set.
//!
//! A list is written as `[u1, u2]` with hyphenated lowercase UUIDs. The parser
//! is lenient about layout: the brackets are optional and any run of commas
//! and whitespace separates entries.

use crate::{Error, Result};
use uuid::Uuid;

/// Separator written between entries.
pub const SEPARATOR: &str = ", ";

/// Formats UUIDs in canonical list form.
#[must_use]
pub fn format(uuids: &[Uuid]) -> String {
    let mut out = String::with_capacity(2 + uuids.len() * (36 + SEPARATOR.len()));
    out.push('[');
    for (i, uuid) in uuids.iter().enumerate() {
        if i > 0 {
            out.push_str(SEPARATOR);
        }
        out.push_str(&uuid.hyphenated().to_string());
    }
    out.push(']');
    out
}

/// Parses a UUID list, preserving input order.
pub fn parse(s: &str) -> Result<Vec<Uuid>> {
    let trimmed = s.trim();
    let body = match (trimmed.strip_prefix('['), trimmed.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => trimmed,
        _ => return Err(Error::InvalidUuidList(format!("unbalanced brackets in {s:?}"))),
    };

    let uuids = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(Uuid::parse_str)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if uuids.is_empty() {
        return Err(Error::InvalidUuidList(format!("no UUIDs in {s:?}")));
    }
    Ok(uuids)
}

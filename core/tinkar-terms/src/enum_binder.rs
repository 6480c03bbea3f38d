//! Binary records for enumerations whose members are bound to concepts.
//!
//! Records are postcard-encoded, so integers are LEB128 varints and strings
//! are a varint length followed by UTF-8:
//!
//! ```text
//! [version][name length][name UTF-8][uuid list length][uuid list UTF-8]
//! ```
//!
//! The name selects the member; the UUID list is the concept the member was
//! bound to when the record was written. Decoding checks that binding again,
//! so a record written before a member was rebound to another concept is
//! rejected instead of silently mapped.

use serde::{Deserialize, Serialize};
use tinkar_common::PublicId;
use tracing::debug;

use crate::{EntityProxy, Error, PrimitiveData, Result};

/// Current (and only) record version.
pub const RECORD_VERSION: u64 = 1;

/// Fields following the version tag in a version 1 record.
#[derive(Debug, Serialize, Deserialize)]
struct RecordV1<'a> {
    #[serde(borrow)]
    name: &'a str,
    #[serde(borrow)]
    uuids: &'a str,
}

/// A closed enumeration whose members each stand for a concept.
pub trait ConceptEnum: Sized + 'static {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    /// Every member, in declaration order.
    fn members() -> &'static [Self];

    /// Programmatic member name, stable across releases.
    fn name(&self) -> &'static str;

    /// Concept the member is bound to.
    fn concept(&self) -> EntityProxy;
}

/// Encodes `member` as a new record.
pub fn encode<E: ConceptEnum>(member: &E, db: &dyn PrimitiveData) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_into(member, db, &mut buf)?;
    Ok(buf)
}

/// Appends a record for `member` to `buf`.
pub fn encode_into<E: ConceptEnum>(
    member: &E,
    db: &dyn PrimitiveData,
    buf: &mut Vec<u8>,
) -> Result<()> {
    let uuids = member.concept().public_id(db)?.to_uuid_string();
    let record = RecordV1 {
        name: member.name(),
        uuids: &uuids,
    };
    let bytes = postcard::to_stdvec(&(RECORD_VERSION, record)).map_err(codec_error)?;
    buf.extend_from_slice(&bytes);
    Ok(())
}

/// Decodes a record into the canonical member of `E`.
///
/// The returned reference points into [`ConceptEnum::members`].
pub fn decode<E: ConceptEnum>(bytes: &[u8], db: &dyn PrimitiveData) -> Result<&'static E> {
    let (version, rest): (u64, &[u8]) = postcard::take_from_bytes(bytes).map_err(codec_error)?;
    match version {
        RECORD_VERSION => decode_v1(rest, db),
        other => Err(Error::UnsupportedVersion(other)),
    }
}

fn decode_v1<E: ConceptEnum>(bytes: &[u8], db: &dyn PrimitiveData) -> Result<&'static E> {
    let (record, trailing): (RecordV1<'_>, &[u8]) =
        postcard::take_from_bytes(bytes).map_err(codec_error)?;
    if !trailing.is_empty() {
        return Err(Error::TrailingBytes(trailing.len()));
    }

    let member = E::members()
        .iter()
        .find(|m| m.name() == record.name)
        .ok_or_else(|| Error::UnknownMember {
            enum_name: E::TYPE_NAME,
            name: record.name.to_string(),
        })?;

    let expected = member.concept().public_id(db)?;
    let drift = |found: String| Error::EnumDrift {
        member: format!("{}::{}", E::TYPE_NAME, record.name),
        expected: expected.to_string(),
        found,
    };
    // An unreadable UUID list is a binding mismatch like any other.
    let found = PublicId::parse(record.uuids).map_err(|_| drift(record.uuids.to_string()))?;
    if expected != found {
        return Err(drift(found.to_string()));
    }

    debug!(enum_name = E::TYPE_NAME, member = record.name, "decoded enum record");
    Ok(member)
}

fn codec_error(err: postcard::Error) -> Error {
    match err {
        postcard::Error::DeserializeUnexpectedEnd => Error::Truncated,
        postcard::Error::DeserializeBadUtf8 => Error::InvalidUtf8,
        postcard::Error::DeserializeBadVarint => Error::MalformedVarint,
        other => Error::Codec(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(version: u64, name: &str, uuids: &str) -> Vec<u8> {
        postcard::to_stdvec(&(version, RecordV1 { name, uuids })).unwrap()
    }

    #[test]
    fn layout_is_varint_prefixed() {
        let bytes = record(1, "AB", "[x]");
        assert_eq!(bytes, vec![1, 2, b'A', b'B', 3, b'[', b'x', b']']);
    }

    #[test]
    fn long_version_uses_multi_byte_varint() {
        let bytes = record(300, "", "");
        assert_eq!(bytes, vec![0xac, 0x02, 0, 0]);
    }

    #[test]
    fn overlong_varint_is_malformed() {
        assert!(matches!(codec_error(postcard::Error::DeserializeBadVarint), Error::MalformedVarint));
        let bytes = [0xffu8; 11];
        let result: postcard::Result<(u64, &[u8])> = postcard::take_from_bytes(&bytes);
        assert!(matches!(result.map_err(codec_error), Err(Error::MalformedVarint)));
    }

    #[test]
    fn string_past_end_is_truncated() {
        let bytes = [10u8, b'a', b'b', b'c'];
        let result: postcard::Result<(&str, &[u8])> = postcard::take_from_bytes(&bytes);
        assert!(matches!(result.map_err(codec_error), Err(Error::Truncated)));
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let bytes = [2u8, 0xc3, 0x28];
        let result: postcard::Result<(&str, &[u8])> = postcard::take_from_bytes(&bytes);
        assert!(matches!(result.map_err(codec_error), Err(Error::InvalidUtf8)));
    }
}

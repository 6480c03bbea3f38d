//! Commands behind the `tinkar-proxy` binary.
//!
//! Commands return their results instead of printing, so they can be tested
//! without spawning the process.

use std::fmt::Write;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tinkar_common::uuid_list;
use tinkar_terms::{
    MemoryPrimitiveData, PatternBinding, ProxyFactory, ProxyKind, State, binding, enum_binder,
};
use tracing::debug;
use uuid::Uuid;

/// What a fragment carries, as printed by `fragment --json`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FragmentSummary {
    pub kind: String,
    pub description: Option<String>,
    pub uuids: Vec<Uuid>,
}

/// Parses an XML proxy fragment and summarizes it.
///
/// In lenient mode failures are reported through the factory's alert sink
/// and only a generic error is returned.
pub fn fragment(factory: &ProxyFactory, xml: &str, lenient: bool) -> Result<FragmentSummary> {
    let proxy = if lenient {
        factory
            .parse_xml_fragment_optional(xml)
            .ok_or_else(|| anyhow!("fragment was not accepted"))?
    } else {
        factory
            .parse_xml_fragment(xml)
            .context("failed to parse fragment")?
    };
    debug!(%proxy, "parsed fragment");

    Ok(FragmentSummary {
        kind: proxy.kind().label().to_string(),
        description: proxy.known_description().map(str::to_string),
        uuids: proxy.known_uuids().map(<[Uuid]>::to_vec).unwrap_or_default(),
    })
}

/// Human readable form of a [`FragmentSummary`].
pub fn render_fragment(summary: &FragmentSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "kind:        {}", summary.kind);
    let _ = writeln!(
        out,
        "description: {}",
        summary.description.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "uuids:       {}", uuid_list::format(&summary.uuids));
    out
}

/// Hex binary record for the status named `name`.
pub fn encode_state(name: &str) -> Result<String> {
    let state = State::from_name(name).ok_or_else(|| anyhow!("unknown status {name:?}"))?;
    // Encoding only reads compile-time terms; an empty store suffices.
    let db = MemoryPrimitiveData::new();
    let bytes = enum_binder::encode(&state, &db)?;
    Ok(hex::encode(bytes))
}

/// Status decoded from a hex binary record.
pub fn decode_state(record: &str) -> Result<State> {
    let bytes = hex::decode(record.trim()).context("record is not valid hex")?;
    let db = MemoryPrimitiveData::new();
    let state = enum_binder::decode::<State>(&bytes, &db).context("failed to decode record")?;
    Ok(*state)
}

/// Field-binding tables for one kind, or for every kind when `kind` is `None`.
pub fn bindings(kind: Option<&str>) -> Result<String> {
    let kinds = match kind {
        Some(kind) => vec![kind.parse::<ProxyKind>()?],
        None => ProxyKind::ALL
            .into_iter()
            .filter(|kind| *kind != ProxyKind::Entity)
            .collect(),
    };

    let mut out = String::new();
    for kind in kinds {
        render_binding(&mut out, binding::binding_for(kind));
        render_binding(&mut out, binding::version_binding_for(kind));
    }
    Ok(out)
}

fn render_binding(out: &mut String, binding: &PatternBinding) {
    let _ = writeln!(
        out,
        "{} {}",
        binding.name(),
        uuid_list::format(&[binding.pattern.primary_uuid()])
    );
    for name in binding.field_names() {
        if let Some(index) = binding.field_index(name) {
            let _ = writeln!(out, "  {index} {name}");
        }
    }
}

//! Proxy normalization and the XML fragment form.
//!
//! A fragment is one self-closing element whose tag names the proxy kind:
//!
//! ```text
//! <concept desc="Active state" uuids="[390aca7e-ec8d-4484-bd0b-7d0d9219347c]"/>
//! ```

use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use tinkar_common::{PublicId, uuid_list};

use crate::alert::{Alert, AlertSink, TracingAlertSink};
use crate::facade::EntityFacade;
use crate::{EntityProxy, Error, PrimitiveData, ProxyKind, Result};

const DESC_ATTR: &[u8] = b"desc";
const UUIDS_ATTR: &[u8] = b"uuids";

/// Builds proxies from fragments and foreign entity values.
#[derive(Clone)]
pub struct ProxyFactory {
    alerts: Arc<dyn AlertSink>,
}

impl Default for ProxyFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyFactory {
    /// Factory reporting through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_alerts(Arc::new(TracingAlertSink))
    }

    #[must_use]
    pub fn with_alerts(alerts: Arc<dyn AlertSink>) -> Self {
        Self { alerts }
    }

    /// Writes `proxy` as a fragment, resolving description and UUIDs if needed.
    pub fn to_xml_fragment(&self, proxy: &EntityProxy, db: &dyn PrimitiveData) -> Result<String> {
        let description = proxy.description(db)?;
        let uuids = proxy.uuids(db)?;
        Ok(format!(
            "<{tag} desc=\"{desc}\" uuids=\"{uuids}\"/>",
            tag = proxy.kind().tag(),
            desc = escape(description),
            uuids = uuid_list::format(uuids),
        ))
    }

    /// Reads a fragment, failing on anything that is not a proxy fragment.
    ///
    /// The input must hold exactly one root element; only a declaration,
    /// comments and processing instructions may surround it.
    pub fn parse_xml_fragment(&self, xml: &str) -> Result<EntityProxy> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let proxy = loop {
            match reader.read_event()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Empty(element) => break Self::element_to_proxy(&element)?,
                Event::Start(element) => {
                    let proxy = Self::element_to_proxy(&element)?;
                    Self::expect_end(&mut reader, &element)?;
                    break proxy;
                }
                Event::Eof => return Err(Error::Fragment("no root element".into())),
                other => return Err(Error::Fragment(format!("unexpected content {other:?}"))),
            }
        };

        loop {
            match reader.read_event()? {
                Event::Eof => return Ok(proxy),
                Event::Comment(_) | Event::PI(_) => {}
                other => {
                    return Err(Error::Fragment(format!(
                        "unexpected content after root element: {other:?}"
                    )));
                }
            }
        }
    }

    /// Reads a fragment; failures are reported as alerts and yield `None`.
    pub fn parse_xml_fragment_optional(&self, xml: &str) -> Option<EntityProxy> {
        match self.parse_xml_fragment(xml) {
            Ok(proxy) => Some(proxy),
            Err(err) => {
                self.alerts
                    .alert(Alert::error(format!("cannot read proxy fragment {xml:?}: {err}")));
                None
            }
        }
    }

    /// Canonical proxy for any value exposing a typed capability.
    ///
    /// Proxies are returned as is (sharing state); other values become nid
    /// proxies of their capability's kind.
    pub fn normalize(&self, value: &dyn EntityFacade) -> Result<EntityProxy> {
        if let Some(proxy) = value.as_proxy() {
            return Ok(proxy.clone());
        }
        let capability = value.capability().ok_or(Error::UnsupportedCapability)?;
        Ok(EntityProxy::from_nid(capability.kind(), value.nid()))
    }

    /// Consumes the close tag of `start`, which must follow it directly.
    fn expect_end(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<()> {
        match reader.read_event()? {
            Event::End(end) if end.name() == start.name() => Ok(()),
            Event::Eof => Err(Error::Fragment(format!(
                "unclosed element <{}>",
                String::from_utf8_lossy(start.name().as_ref())
            ))),
            other => Err(Error::Fragment(format!(
                "unexpected content inside root element: {other:?}"
            ))),
        }
    }

    fn element_to_proxy(element: &BytesStart<'_>) -> Result<EntityProxy> {
        let tag = std::str::from_utf8(element.name().as_ref())
            .map_err(|_| Error::Fragment("tag is not UTF-8".into()))?
            .to_string();
        let kind = ProxyKind::from_tag(&tag)?;

        let mut desc = None;
        let mut uuids = None;
        for attr in element.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                DESC_ATTR => desc = Some(attr.unescape_value()?.into_owned()),
                UUIDS_ATTR => uuids = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }

        let uuids = uuids.ok_or_else(|| Error::Fragment(format!("<{tag}> has no uuids attribute")))?;
        let public_id = PublicId::parse(&uuids)?;
        Ok(match desc {
            Some(desc) => EntityProxy::from_public_id(kind, &desc, &public_id),
            None => EntityProxy::from_uuids_only(kind, public_id.as_uuids()),
        })
    }
}

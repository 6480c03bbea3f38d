//! Entity proxies and term bindings for the Tinkar terminology model.
//!
//! Defines the layer between stable identities and process-local handles:
//! - [`EntityProxy`]: a lazily resolved reference holding a nid, UUIDs, or both
//! - [`PrimitiveData`]: the backing store contract proxies resolve against,
//!   with [`MemoryPrimitiveData`] as an in-memory implementation
//! - [`binding`]: fixed field indices for each entity family's pattern
//! - [`enum_binder`]: versioned binary records for concept-bound enums
//! - [`ProxyFactory`]: XML fragments and normalization of entity values
//! - [`State`]: component status values and their nid reverse lookup
//!
//! Nothing here holds global mutable state. Every call that may touch the
//! store takes it as an argument, so several stores can coexist in one
//! process.

mod alert;
pub mod binding;
pub mod enum_binder;
mod error;
mod facade;
mod factory;
mod kind;
mod proxy;
mod state;
mod store;
pub mod term;

pub use alert::{Alert, AlertSeverity, AlertSink, CollectingAlertSink, TracingAlertSink};
pub use binding::PatternBinding;
pub use enum_binder::ConceptEnum;
pub use error::{Error, Result, StoreError, StoreResult};
pub use facade::{Capability, EntityFacade};
pub use factory::ProxyFactory;
pub use kind::ProxyKind;
pub use proxy::{Comparand, EntityProxy, HasNid, HasPublicId, UNRESOLVED_NID};
pub use state::{State, StateLookup};
pub use store::{FIRST_NID, LookupStats, MemoryPrimitiveData, PrimitiveData};
pub use term::Term;
pub use tinkar_common::PublicId;

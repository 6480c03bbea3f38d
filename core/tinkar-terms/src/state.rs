//! Component status values.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enum_binder::ConceptEnum;
use crate::term::{self, Term};
use crate::{EntityProxy, PrimitiveData, Result};

/// Canonical storage for decoded members; references into it are stable.
static MEMBERS: [State; 5] = State::ALL;

/// Status of a component version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Active,
    Inactive,
    Withdrawn,
    Canceled,
    Primordial,
}

impl State {
    pub const ALL: [State; 5] = [
        Self::Active,
        Self::Inactive,
        Self::Withdrawn,
        Self::Canceled,
        Self::Primordial,
    ];

    /// Term of the concept this status is bound to.
    #[must_use]
    pub const fn term(self) -> Term {
        match self {
            Self::Active => term::ACTIVE_STATE,
            Self::Inactive => term::INACTIVE_STATE,
            Self::Withdrawn => term::WITHDRAWN_STATE,
            Self::Canceled => term::CANCELED_STATE,
            Self::Primordial => term::PRIMORDIAL_STATE,
        }
    }

    /// Programmatic name, as written into binary records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Withdrawn => "WITHDRAWN",
            Self::Canceled => "CANCELED",
            Self::Primordial => "PRIMORDIAL",
        }
    }

    /// Member with the given programmatic name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl ConceptEnum for State {
    const TYPE_NAME: &'static str = "State";

    fn members() -> &'static [Self] {
        &MEMBERS
    }

    fn name(&self) -> &'static str {
        State::name(*self)
    }

    fn concept(&self) -> EntityProxy {
        self.term().proxy()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reverse lookup from concept nid to [`State`].
///
/// The table is built from the store on the first lookup and reused after
/// that. Racing first callers may each build it; one table is kept.
#[derive(Debug, Default)]
pub struct StateLookup {
    table: OnceLock<HashMap<i32, State>>,
}

impl StateLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status bound to the concept with `nid`, or `None` for any other nid.
    pub fn from_concept_nid(&self, db: &dyn PrimitiveData, nid: i32) -> Result<Option<State>> {
        let table = match self.table.get() {
            Some(table) => table,
            None => {
                let built = Self::build(db)?;
                self.table.get_or_init(|| built)
            }
        };
        Ok(table.get(&nid).copied())
    }

    /// True once the table has been built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    fn build(db: &dyn PrimitiveData) -> Result<HashMap<i32, State>> {
        let table = State::ALL
            .into_iter()
            .map(|state| Ok((state.concept().nid(db)?, state)))
            .collect::<Result<HashMap<_, _>>>()?;
        debug!(entries = table.len(), "built state lookup");
        Ok(table)
    }
}

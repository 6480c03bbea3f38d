//! Field-index registry for the entity families.
//!
//! Each family is stored against a field pattern that fixes the order of its
//! top-level fields, and a second pattern for its version records. Readers of
//! raw entity records index fields by position, so the numbers here are part
//! of the on-disk format.
//!
//! Two families do not follow the component layout:
//! - Semantic puts its pattern and referenced component ahead of the version
//!   items, so `version_items` is 3, not 1.
//! - Stamp versions carry no stamp field, so status sits at 0 and the rest
//!   follow from there.
//!
//! Downstream readers depend on these exact values; they are provisional
//! upstream but must not be renumbered here.

use crate::ProxyKind;
use crate::term::{self, Term};

/// Field pattern identity plus the index of each named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternBinding {
    pub pattern: Term,
    pub fields: &'static [(&'static str, usize)],
}

impl PatternBinding {
    /// Pattern name, as published.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.pattern.description()
    }

    /// Index of `field`, if the pattern defines it.
    #[must_use]
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, index)| *index)
    }

    /// Field names in index order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        let mut fields = self.fields.to_vec();
        fields.sort_by_key(|(_, index)| *index);
        fields.into_iter().map(|(name, _)| name)
    }

    #[must_use]
    pub const fn field_count(&self) -> usize {
        self.fields.len()
    }
}

pub mod component {
    use super::*;

    pub const fn public_id_field_index() -> usize {
        0
    }

    pub const fn version_items_field_index() -> usize {
        1
    }

    pub const BINDING: PatternBinding = PatternBinding {
        pattern: term::COMPONENT_PATTERN,
        fields: &[
            ("public_id", public_id_field_index()),
            ("version_items", version_items_field_index()),
        ],
    };

    pub mod version {
        use super::super::*;

        pub const fn stamp_field_index() -> usize {
            0
        }

        pub const BINDING: PatternBinding = PatternBinding {
            pattern: term::COMPONENT_VERSION_PATTERN,
            fields: &[("stamp", stamp_field_index())],
        };
    }
}

pub mod concept {
    use super::*;

    pub const fn public_id_field_index() -> usize {
        component::public_id_field_index()
    }

    pub const fn version_items_field_index() -> usize {
        component::version_items_field_index()
    }

    pub const BINDING: PatternBinding = PatternBinding {
        pattern: term::CONCEPT_PATTERN,
        fields: &[
            ("public_id", public_id_field_index()),
            ("version_items", version_items_field_index()),
        ],
    };

    pub mod version {
        use super::super::*;

        pub const fn stamp_field_index() -> usize {
            component::version::stamp_field_index()
        }

        pub const BINDING: PatternBinding = PatternBinding {
            pattern: term::CONCEPT_VERSION_PATTERN,
            fields: &[("stamp", stamp_field_index())],
        };
    }
}

pub mod pattern {
    use super::*;

    pub const fn public_id_field_index() -> usize {
        component::public_id_field_index()
    }

    pub const fn version_items_field_index() -> usize {
        component::version_items_field_index()
    }

    pub const BINDING: PatternBinding = PatternBinding {
        pattern: term::PATTERN_PATTERN,
        fields: &[
            ("public_id", public_id_field_index()),
            ("version_items", version_items_field_index()),
        ],
    };

    pub mod version {
        use super::super::*;

        pub const fn stamp_field_index() -> usize {
            component::version::stamp_field_index()
        }

        pub const fn semantic_purpose_field_index() -> usize {
            1
        }

        pub const fn semantic_meaning_field_index() -> usize {
            2
        }

        pub const fn field_definition_list_field_index() -> usize {
            3
        }

        pub const BINDING: PatternBinding = PatternBinding {
            pattern: term::PATTERN_VERSION_PATTERN,
            fields: &[
                ("stamp", stamp_field_index()),
                ("semantic_purpose", semantic_purpose_field_index()),
                ("semantic_meaning", semantic_meaning_field_index()),
                ("field_definition_list", field_definition_list_field_index()),
            ],
        };
    }
}

pub mod semantic {
    use super::*;

    pub const fn public_id_field_index() -> usize {
        component::public_id_field_index()
    }

    pub const fn pattern_field_index() -> usize {
        1
    }

    pub const fn referenced_component_field_index() -> usize {
        2
    }

    /// Out of step with the component layout: follows pattern and referenced component.
    pub const fn version_items_field_index() -> usize {
        3
    }

    pub const BINDING: PatternBinding = PatternBinding {
        pattern: term::SEMANTIC_PATTERN,
        fields: &[
            ("public_id", public_id_field_index()),
            ("pattern", pattern_field_index()),
            ("referenced_component", referenced_component_field_index()),
            ("version_items", version_items_field_index()),
        ],
    };

    pub mod version {
        use super::super::*;

        pub const fn stamp_field_index() -> usize {
            component::version::stamp_field_index()
        }

        pub const fn field_values_field_index() -> usize {
            1
        }

        pub const BINDING: PatternBinding = PatternBinding {
            pattern: term::SEMANTIC_VERSION_PATTERN,
            fields: &[
                ("stamp", stamp_field_index()),
                ("field_values", field_values_field_index()),
            ],
        };
    }
}

pub mod stamp {
    use super::*;

    pub const fn public_id_field_index() -> usize {
        component::public_id_field_index()
    }

    pub const fn version_items_field_index() -> usize {
        component::version_items_field_index()
    }

    pub const BINDING: PatternBinding = PatternBinding {
        pattern: term::STAMP_PATTERN,
        fields: &[
            ("public_id", public_id_field_index()),
            ("version_items", version_items_field_index()),
        ],
    };

    /// A stamp version has no stamp of its own; every index is one lower
    /// than the component version layout would give it.
    pub mod version {
        use super::super::*;

        pub const fn status_field_index() -> usize {
            0
        }

        pub const fn time_field_index() -> usize {
            1
        }

        pub const fn author_field_index() -> usize {
            2
        }

        pub const fn module_field_index() -> usize {
            3
        }

        pub const fn path_field_index() -> usize {
            4
        }

        pub const BINDING: PatternBinding = PatternBinding {
            pattern: term::STAMP_VERSION_PATTERN,
            fields: &[
                ("status", status_field_index()),
                ("time", time_field_index()),
                ("author", author_field_index()),
                ("module", module_field_index()),
                ("path", path_field_index()),
            ],
        };
    }
}

/// Top-level binding for a kind; the untyped kind uses the component layout.
#[must_use]
pub fn binding_for(kind: ProxyKind) -> &'static PatternBinding {
    match kind {
        ProxyKind::Entity => &component::BINDING,
        ProxyKind::Concept => &concept::BINDING,
        ProxyKind::Pattern => &pattern::BINDING,
        ProxyKind::Semantic => &semantic::BINDING,
        ProxyKind::Stamp => &stamp::BINDING,
    }
}

/// Version record binding for a kind.
#[must_use]
pub fn version_binding_for(kind: ProxyKind) -> &'static PatternBinding {
    match kind {
        ProxyKind::Entity => &component::version::BINDING,
        ProxyKind::Concept => &concept::version::BINDING,
        ProxyKind::Pattern => &pattern::version::BINDING,
        ProxyKind::Semantic => &semantic::version::BINDING,
        ProxyKind::Stamp => &stamp::version::BINDING,
    }
}

//! Structural errors detected while laying out a snapshot.
//!
//! The store prevents all of these. They are reported, instead of looping or
//! panicking, when layout is handed a corrupted snapshot.

use thiserror::Error;

use kinship_core::identifier::PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("the tree has members but no root")]
    NoRoot,

    #[error("the tree has {} roots", .0.len())]
    AmbiguousRoot(Vec<PersonId>),

    #[error("{person} refers to missing member {missing}")]
    MissingReference { person: PersonId, missing: PersonId },

    #[error("{person} is married to {spouse}, but not the other way round")]
    AsymmetricSpouse { person: PersonId, spouse: PersonId },

    #[error("{0} is its own ancestor or is reached along more than one line")]
    CycleDetected(PersonId),

    #[error("{0} is connected neither to the root nor to a floating subtree")]
    Unreachable(PersonId),
}

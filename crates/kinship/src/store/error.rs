//! Validation errors reported by the relationship store.

use thiserror::Error;

use kinship_core::identifier::PersonId;

use crate::request::RelationshipKind;

/// A rejected store mutation. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a name is required")]
    InvalidName,

    #[error("the name `{0}` is already taken")]
    DuplicateName(String),

    #[error("the tree already has a root ({0})")]
    DuplicateRoot(PersonId),

    #[error("parent {0} does not exist")]
    UnknownParent(PersonId),

    #[error("a child needs at least one parent")]
    MissingParents,

    #[error("a person can have at most two parents, {0} were requested")]
    TooManyParents(usize),

    #[error("{0} and {1} are not married to each other")]
    NotASpouseCouple(PersonId, PersonId),

    #[error("{0} has no parents to share with a sibling")]
    NoParent(PersonId),

    #[error("{0} is already married")]
    AlreadyMarried(PersonId),

    #[error("{0} joined the tree by marriage and cannot be given parents")]
    MarriedIn(PersonId),

    #[error("member {0} does not exist")]
    NotFound(PersonId),

    #[error("the root {0} cannot be deleted while other members remain")]
    CannotDeleteRootWithDescendants(PersonId),

    #[error("a `{kind}` request takes {expected} related member(s), {found} were given")]
    RelationArity {
        kind: RelationshipKind,
        expected: &'static str,
        found: usize,
    },
}

impl StoreError {
    /// Stable machine-readable code of the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "kinship::store::invalid_name",
            Self::DuplicateName(_) => "kinship::store::duplicate_name",
            Self::DuplicateRoot(_) => "kinship::store::duplicate_root",
            Self::UnknownParent(_) => "kinship::store::unknown_parent",
            Self::MissingParents => "kinship::store::missing_parents",
            Self::TooManyParents(_) => "kinship::store::too_many_parents",
            Self::NotASpouseCouple(..) => "kinship::store::not_a_spouse_couple",
            Self::NoParent(_) => "kinship::store::no_parent",
            Self::AlreadyMarried(_) => "kinship::store::already_married",
            Self::MarriedIn(_) => "kinship::store::married_in",
            Self::NotFound(_) => "kinship::store::not_found",
            Self::CannotDeleteRootWithDescendants(_) => "kinship::store::root_has_descendants",
            Self::RelationArity { .. } => "kinship::store::relation_arity",
        }
    }

    /// Hint on how to fix the request, when one exists.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateRoot(_) => Some("add the new person as a parent of the root instead"),
            Self::NotASpouseCouple(..) => Some("marry the two parents first with a spouse request"),
            Self::NoParent(_) => Some("siblings copy the parents of an existing member; add a parent first"),
            Self::AlreadyMarried(_) => Some("each member can have one spouse at a time"),
            Self::CannotDeleteRootWithDescendants(_) => {
                Some("delete the other members first, or switch the store to the cascade delete policy")
            }
            _ => None,
        }
    }
}

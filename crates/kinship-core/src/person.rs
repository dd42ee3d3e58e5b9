//! Tree members and the ways they are attached to a tree.
//!
//! A [`Person`] carries its own [`Relation`] instead of a bag of optional
//! fields: whether it has parents, and how many, is decided by the variant.
//!
//! # Overview
//!
//! - [`Person`] - One member of the tree
//! - [`Relation`] - How the member hangs in the tree (root, child, sibling, spouse, orphan)
//! - [`Parents`] - A parent set of exactly one or two members

use std::fmt;

use crate::identifier::PersonId;

/// A non-empty parent set with at most two members.
///
/// Two parents are always stored in ascending id order so that equal sets
/// compare equal regardless of the order the caller supplied them in.
///
/// # Examples
///
/// ```
/// use kinship_core::{identifier::PersonId, person::Parents};
///
/// let dad = PersonId::new(2);
/// let mom = PersonId::new(3);
///
/// let parents = Parents::two(mom, dad);
/// assert_eq!(parents, Parents::two(dad, mom));
/// assert_eq!(parents.ids().collect::<Vec<_>>(), vec![dad, mom]);
///
/// assert_eq!(parents.without(mom), Some(Parents::One(dad)));
/// assert_eq!(Parents::One(dad).without(dad), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parents {
    One(PersonId),
    Two(PersonId, PersonId),
}

impl Parents {
    /// Creates a two-member parent set, normalizing the order.
    pub fn two(first: PersonId, second: PersonId) -> Self {
        if first <= second {
            Self::Two(first, second)
        } else {
            Self::Two(second, first)
        }
    }

    /// Returns the parent ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = PersonId> {
        let (first, second) = match self {
            Self::One(id) => (id, None),
            Self::Two(first, second) => (first, Some(second)),
        };
        std::iter::once(first).chain(second)
    }

    /// Returns the number of parents (1 or 2).
    pub fn len(self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    /// Checks whether `id` is one of the parents.
    pub fn contains(self, id: PersonId) -> bool {
        self.ids().any(|parent| parent == id)
    }

    /// Returns the parent set without `id`, or `None` if nothing remains.
    pub fn without(self, id: PersonId) -> Option<Self> {
        match self {
            Self::One(only) if only == id => None,
            Self::One(_) => Some(self),
            Self::Two(first, second) if first == id => Some(Self::One(second)),
            Self::Two(first, second) if second == id => Some(Self::One(first)),
            Self::Two(..) => Some(self),
        }
    }
}

/// How a person is attached to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The anchor of the tree. Exactly one member of a non-empty store is the root.
    Root,
    /// Descends from one parent or from a married couple.
    Child { parents: Parents },
    /// Added next to an existing member and shares a copy of its parent set.
    Sibling { parents: Parents },
    /// Joined the tree by marrying `partner`; has no parents in the tree.
    Spouse { partner: PersonId },
    /// Lost every attachment through deletions and floats on its own.
    Orphan,
}

impl Relation {
    /// Returns the parent set for child and sibling relations.
    pub fn parents(&self) -> Option<Parents> {
        match self {
            Self::Child { parents } | Self::Sibling { parents } => Some(*parents),
            Self::Root | Self::Spouse { .. } | Self::Orphan => None,
        }
    }

    /// Returns the same relation kind with a different parent set.
    ///
    /// Relations without parents are returned unchanged.
    pub fn with_parents(self, parents: Parents) -> Self {
        match self {
            Self::Child { .. } => Self::Child { parents },
            Self::Sibling { .. } => Self::Sibling { parents },
            other => other,
        }
    }

    /// Short lowercase label of the relation kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Child { .. } => "child",
            Self::Sibling { .. } => "sibling",
            Self::Spouse { .. } => "spouse",
            Self::Orphan => "orphan",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One member of a family tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    name: String,
    relation: Relation,
    spouse: Option<PersonId>,
}

impl Person {
    /// Creates an unmarried person.
    pub fn new(id: PersonId, name: impl Into<String>, relation: Relation) -> Self {
        Self {
            id,
            name: name.into(),
            relation,
            spouse: None,
        }
    }

    /// Returns the person's id.
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the person is attached to the tree.
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Returns the current spouse, if married.
    pub fn spouse(&self) -> Option<PersonId> {
        self.spouse
    }

    /// Returns the parent set, if the person has parents.
    pub fn parents(&self) -> Option<Parents> {
        self.relation.parents()
    }

    /// Checks whether `id` is one of this person's parents.
    pub fn has_parent(&self, id: PersonId) -> bool {
        self.parents().is_some_and(|parents| parents.contains(id))
    }

    /// Checks whether this person is the root of the tree.
    pub fn is_root(&self) -> bool {
        self.relation == Relation::Root
    }

    /// Replaces the relation.
    pub fn set_relation(&mut self, relation: Relation) {
        self.relation = relation;
    }

    /// Replaces the spouse link. Callers keep the link symmetric.
    pub fn set_spouse(&mut self, spouse: Option<PersonId>) {
        self.spouse = spouse;
    }
}

//! Requests accepted from the outside world.
//!
//! A front end (a form, a script, the CLI) turns user input into one of the
//! request types below and hands it to [`FamilyTree`](crate::FamilyTree).
//! All of them deserialize with serde, so a sequence of requests can be kept
//! in a file.
//!
//! ```
//! # use kinship::request::{AddRelationshipRequest, RelationshipKind};
//! # use kinship::identifier::PersonId;
//! let request = AddRelationshipRequest::new("Dana", RelationshipKind::Child)
//!     .related_to([PersonId::new(2), PersonId::new(3)]);
//!
//! assert_eq!(request.related().len(), 2);
//! ```

use std::fmt;

use serde::Deserialize;

use kinship_core::identifier::PersonId;

use crate::store::StoreError;

/// The relationship a new person has to the members it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// First member of the tree; no related members.
    Root,
    /// Parent of exactly one existing member.
    Parent,
    /// Child of one parent or of a married couple.
    Child,
    /// Sibling of exactly one existing member.
    Sibling,
    /// Spouse of exactly one existing member.
    Spouse,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Root => "root",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Spouse => "spouse",
        };
        f.write_str(label)
    }
}

/// Adds a person with a relationship to existing members.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddRelationshipRequest {
    name: String,
    relationship: RelationshipKind,
    #[serde(default)]
    related_to: Vec<PersonId>,
}

/// An [`AddRelationshipRequest`] whose related members match its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attachment<'a> {
    Root,
    ParentOf(PersonId),
    ChildOf(&'a [PersonId]),
    SiblingOf(PersonId),
    SpouseOf(PersonId),
}

impl AddRelationshipRequest {
    /// Creates a request without related members.
    pub fn new(name: impl Into<String>, relationship: RelationshipKind) -> Self {
        Self {
            name: name.into(),
            relationship,
            related_to: Vec::new(),
        }
    }

    /// Sets the related members.
    pub fn related_to(mut self, related: impl IntoIterator<Item = PersonId>) -> Self {
        self.related_to = related.into_iter().collect();
        self
    }

    /// Returns the requested name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the relationship kind.
    pub fn relationship(&self) -> RelationshipKind {
        self.relationship
    }

    /// Returns the related member ids.
    pub fn related(&self) -> &[PersonId] {
        &self.related_to
    }

    /// Checks the number of related members against the relationship kind.
    ///
    /// Child requests pass their ids through unchecked; the store reports
    /// missing or surplus parents with dedicated errors.
    pub(crate) fn attachment(&self) -> Result<Attachment<'_>, StoreError> {
        let single = || match self.related_to.as_slice() {
            [id] => Ok(*id),
            other => Err(StoreError::RelationArity {
                kind: self.relationship,
                expected: "exactly one",
                found: other.len(),
            }),
        };

        match self.relationship {
            RelationshipKind::Root if self.related_to.is_empty() => Ok(Attachment::Root),
            RelationshipKind::Root => Err(StoreError::RelationArity {
                kind: RelationshipKind::Root,
                expected: "no",
                found: self.related_to.len(),
            }),
            RelationshipKind::Parent => single().map(Attachment::ParentOf),
            RelationshipKind::Child => Ok(Attachment::ChildOf(&self.related_to)),
            RelationshipKind::Sibling => single().map(Attachment::SiblingOf),
            RelationshipKind::Spouse => single().map(Attachment::SpouseOf),
        }
    }
}

/// Removes a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteRequest {
    id: PersonId,
}

impl DeleteRequest {
    /// Creates a delete request.
    pub fn new(id: PersonId) -> Self {
        Self { id }
    }

    /// Returns the member to delete.
    pub fn id(&self) -> PersonId {
        self.id
    }
}

/// Looks members up by part of their name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    query: String,
}

impl SearchRequest {
    /// Creates a search request.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Returns the query string.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Any request, tagged by `action` when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Command {
    Add(AddRelationshipRequest),
    Delete(DeleteRequest),
    Search(SearchRequest),
}

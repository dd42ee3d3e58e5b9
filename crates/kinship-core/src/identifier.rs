//! Identifiers for tree members.
//!
//! This module provides the [`PersonId`] type. Ids are handed out by the
//! relationship store in creation order and are never reused, so a smaller id
//! always means an earlier member. Layout relies on this ordering for its
//! deterministic tie-breaks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique, monotonically assigned identifier of a tree member.
///
/// # Examples
///
/// ```
/// use kinship_core::identifier::PersonId;
///
/// let first = PersonId::new(1);
/// let second = first.next();
///
/// assert!(first < second);
/// assert_eq!(second.get(), 2);
/// assert_eq!(second.to_string(), "#2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u32);

impl PersonId {
    /// The id given to the first member of a store.
    pub const FIRST: PersonId = PersonId(1);

    /// Creates a `PersonId` from its raw value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PersonId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

//! The relationship store.
//!
//! [`FamilyStore`] owns every member of one family tree and enforces the
//! structural rules on each mutation:
//!
//! - a non-empty store has exactly one root;
//! - a member has one or two parents, and two parents are a married couple;
//! - spouse links are symmetric and monogamous;
//! - nobody is their own ancestor.
//!
//! A rejected mutation returns a [`StoreError`] and leaves the store exactly
//! as it was. Members are kept in an id-indexed, insertion-ordered map, so
//! lookups are O(1) and iteration follows creation order.

mod error;
mod removal;

pub use error::StoreError;

use indexmap::IndexMap;
use log::{debug, trace};

use kinship_core::{
    identifier::PersonId,
    person::{Parents, Person, Relation},
};

use crate::{
    config::StoreConfig,
    request::{AddRelationshipRequest, Attachment},
};

/// Owns the members of one family tree.
///
/// # Examples
///
/// ```
/// use kinship::store::FamilyStore;
///
/// let mut store = FamilyStore::default();
/// let alice = store.add_root("Alice").unwrap();
/// let bob = store.add_child("Bob", &[alice]).unwrap();
/// let carol = store.add_spouse("Carol", bob).unwrap();
/// let dana = store.add_child("Dana", &[bob, carol]).unwrap();
///
/// assert_eq!(store.len(), 4);
/// assert_eq!(store.get(carol).unwrap().spouse(), Some(bob));
/// assert!(store.get(dana).unwrap().has_parent(carol));
/// ```
#[derive(Debug, Clone)]
pub struct FamilyStore {
    members: IndexMap<PersonId, Person>,
    next_id: PersonId,
    revision: u64,
    config: StoreConfig,
}

impl Default for FamilyStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl FamilyStore {
    /// Creates an empty store with the given policy.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            members: IndexMap::new(),
            next_id: PersonId::FIRST,
            revision: 0,
            config,
        }
    }

    /// Returns the store policy.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the store has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns a counter bumped by every successful mutation.
    ///
    /// Front ends compare it to decide whether the layout must be recomputed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Looks a member up by id.
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.members.get(&id)
    }

    /// Returns all members in creation order.
    pub fn members(&self) -> impl Iterator<Item = &Person> {
        self.members.values()
    }

    /// Returns the root, if the store is not empty.
    pub fn root(&self) -> Option<&Person> {
        self.members.values().find(|person| person.is_root())
    }

    /// Returns the members having `id` as a parent, in ascending id order.
    pub fn children_of(&self, id: PersonId) -> Vec<&Person> {
        self.members
            .values()
            .filter(|person| person.has_parent(id))
            .collect()
    }

    /// Adds a member according to a request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RelationArity`] when the number of related members
    /// does not fit the relationship kind, or any error of the matching
    /// `add_*` operation.
    pub fn apply(&mut self, request: &AddRelationshipRequest) -> Result<PersonId, StoreError> {
        match request.attachment()? {
            Attachment::Root => self.add_root(request.name()),
            Attachment::ParentOf(child) => self.add_parent(request.name(), child),
            Attachment::ChildOf(parents) => self.add_child(request.name(), parents),
            Attachment::SiblingOf(sibling) => self.add_sibling(request.name(), sibling),
            Attachment::SpouseOf(partner) => self.add_spouse(request.name(), partner),
        }
    }

    /// Adds the root of the tree.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] if the name is empty.
    /// - [`StoreError::DuplicateName`] if names must be unique and the name is taken.
    /// - [`StoreError::DuplicateRoot`] if the tree already has a root.
    pub fn add_root(&mut self, name: &str) -> Result<PersonId, StoreError> {
        let name = self.validate_name(name)?;
        if let Some(root) = self.root() {
            return Err(StoreError::DuplicateRoot(root.id()));
        }

        let id = self.insert(name, Relation::Root);
        self.touch();
        Ok(id)
    }

    /// Adds a child of one parent or of a married couple.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] / [`StoreError::DuplicateName`] for a bad name.
    /// - [`StoreError::MissingParents`] if no parent is given.
    /// - [`StoreError::TooManyParents`] if more than two parents are given.
    /// - [`StoreError::UnknownParent`] if a parent does not exist.
    /// - [`StoreError::NotASpouseCouple`] if two parents are not married to each other.
    pub fn add_child(&mut self, name: &str, parent_ids: &[PersonId]) -> Result<PersonId, StoreError> {
        let name = self.validate_name(name)?;

        let parents = match *parent_ids {
            [] => return Err(StoreError::MissingParents),
            [only] => {
                self.require_parent(only)?;
                Parents::One(only)
            }
            [first, second] => {
                self.require_parent(first)?;
                self.require_parent(second)?;
                if !self.are_married(first, second) {
                    return Err(StoreError::NotASpouseCouple(first, second));
                }
                Parents::two(first, second)
            }
            _ => return Err(StoreError::TooManyParents(parent_ids.len())),
        };

        let id = self.insert(name, Relation::Child { parents });
        self.touch();
        Ok(id)
    }

    /// Adds a sibling of an existing member, sharing its parents.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] / [`StoreError::DuplicateName`] for a bad name.
    /// - [`StoreError::NotFound`] if `sibling_of` does not exist.
    /// - [`StoreError::NoParent`] if `sibling_of` has no parents (the root, a
    ///   married-in spouse or an orphan).
    pub fn add_sibling(&mut self, name: &str, sibling_of: PersonId) -> Result<PersonId, StoreError> {
        let name = self.validate_name(name)?;
        let parents = self
            .person(sibling_of)?
            .parents()
            .ok_or(StoreError::NoParent(sibling_of))?;

        let id = self.insert(name, Relation::Sibling { parents });
        self.touch();
        Ok(id)
    }

    /// Adds the spouse of an unmarried member.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] / [`StoreError::DuplicateName`] for a bad name.
    /// - [`StoreError::NotFound`] if `partner` does not exist.
    /// - [`StoreError::AlreadyMarried`] if `partner` already has a spouse.
    pub fn add_spouse(&mut self, name: &str, partner: PersonId) -> Result<PersonId, StoreError> {
        let name = self.validate_name(name)?;
        if self.person(partner)?.spouse().is_some() {
            return Err(StoreError::AlreadyMarried(partner));
        }

        let id = self.insert(name, Relation::Spouse { partner });
        self.marry(id, partner);
        self.touch();
        Ok(id)
    }

    /// Adds a parent of an existing member.
    ///
    /// - A new parent of the root becomes the root.
    /// - A new parent of an orphan floats above it as an orphan.
    /// - A member with one parent gets the new person as second parent, who
    ///   marries the existing parent.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] / [`StoreError::DuplicateName`] for a bad name.
    /// - [`StoreError::NotFound`] if `child` does not exist.
    /// - [`StoreError::MarriedIn`] if `child` joined the tree by marriage.
    /// - [`StoreError::TooManyParents`] if `child` already has two parents.
    /// - [`StoreError::AlreadyMarried`] if the existing single parent is married.
    pub fn add_parent(&mut self, name: &str, child: PersonId) -> Result<PersonId, StoreError> {
        let name = self.validate_name(name)?;
        let relation = self.person(child)?.relation();

        let id = match relation {
            Relation::Root | Relation::Orphan => {
                let id = self.insert(name, relation);
                self.set_relation(child, Relation::Child {
                    parents: Parents::One(id),
                });
                id
            }
            Relation::Spouse { .. } => return Err(StoreError::MarriedIn(child)),
            Relation::Child { parents } | Relation::Sibling { parents } => {
                let Parents::One(existing) = parents else {
                    return Err(StoreError::TooManyParents(parents.len() + 1));
                };
                let existing_spouse = self
                    .get(existing)
                    .ok_or(StoreError::UnknownParent(existing))?
                    .spouse();
                if existing_spouse.is_some() {
                    return Err(StoreError::AlreadyMarried(existing));
                }

                let id = self.insert(name, Relation::Spouse { partner: existing });
                self.marry(id, existing);
                self.set_relation(child, relation.with_parents(Parents::two(existing, id)));
                id
            }
        };

        self.touch();
        Ok(id)
    }

    /// Finds members whose name contains `query`, ignoring case.
    ///
    /// Queries shorter than two characters (after trimming) match nothing.
    /// Matches are returned in creation order.
    pub fn find_by_name(&self, query: &str) -> Vec<&Person> {
        let query = query.trim();
        if query.chars().count() < 2 {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.members
            .values()
            .filter(|person| person.name().to_lowercase().contains(&needle))
            .collect()
    }

    fn validate_name(&self, name: &str) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        if self.config.unique_names() && self.members.values().any(|person| person.name() == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn person(&self, id: PersonId) -> Result<&Person, StoreError> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    fn require_parent(&self, id: PersonId) -> Result<(), StoreError> {
        if self.members.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::UnknownParent(id))
        }
    }

    fn are_married(&self, first: PersonId, second: PersonId) -> bool {
        first != second
            && self.get(first).and_then(Person::spouse) == Some(second)
            && self.get(second).and_then(Person::spouse) == Some(first)
    }

    fn insert(&mut self, name: String, relation: Relation) -> PersonId {
        let id = self.next_id;
        self.next_id = id.next();

        debug!(id = id.get(), name = name.as_str(), relation = relation.label(); "Member added");
        self.members.insert(id, Person::new(id, name, relation));
        id
    }

    fn marry(&mut self, first: PersonId, second: PersonId) {
        trace!(first = first.get(), second = second.get(); "Linking spouses");
        if let Some(person) = self.members.get_mut(&first) {
            person.set_spouse(Some(second));
        }
        if let Some(person) = self.members.get_mut(&second) {
            person.set_spouse(Some(first));
        }
    }

    fn set_relation(&mut self, id: PersonId, relation: Relation) {
        if let Some(person) = self.members.get_mut(&id) {
            trace!(id = id.get(), relation = relation.label(); "Relation changed");
            person.set_relation(relation);
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

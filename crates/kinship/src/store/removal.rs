//! Member deletion and reference cleanup.

use indexmap::IndexSet;
use log::{debug, info};

use kinship_core::{
    identifier::PersonId,
    person::{Person, Relation},
};

use super::{FamilyStore, StoreError};
use crate::config::DeletePolicy;

impl FamilyStore {
    /// Deletes a member and returns the ids that were removed, ascending.
    ///
    /// With [`DeletePolicy::Orphan`] only `id` is removed. Children that lose
    /// their last parent, and married-in spouses that lose their partner,
    /// become orphans. The root can only be deleted when it is the last member.
    ///
    /// With [`DeletePolicy::Cascade`] the member's descendants and the
    /// married-in partners of every removed member go too. Deleting the root
    /// empties the store.
    ///
    /// Either way, no remaining member references a removed one afterwards.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `id` does not exist.
    /// - [`StoreError::CannotDeleteRootWithDescendants`] when deleting the root
    ///   under the orphan policy while other members remain.
    pub fn delete_member(&mut self, id: PersonId) -> Result<Vec<PersonId>, StoreError> {
        let person = self.person(id)?;
        let is_root = person.is_root();

        let removed: IndexSet<PersonId> = match self.config.delete_policy() {
            DeletePolicy::Orphan if is_root && self.members.len() > 1 => {
                return Err(StoreError::CannotDeleteRootWithDescendants(id));
            }
            DeletePolicy::Orphan => IndexSet::from([id]),
            DeletePolicy::Cascade if is_root => self.members.keys().copied().collect(),
            DeletePolicy::Cascade => self.cascade_from(id),
        };

        for removed_id in &removed {
            self.members.shift_remove(removed_id);
        }
        for person in self.members.values_mut() {
            detach(person, &removed);
        }

        let mut removed: Vec<PersonId> = removed.into_iter().collect();
        removed.sort_unstable();

        info!(id = id.get(), removed = removed.len(); "Member deleted");
        self.touch();
        Ok(removed)
    }

    /// Collects `id`, its descendants and the married-in partners of all of them.
    fn cascade_from(&self, id: PersonId) -> IndexSet<PersonId> {
        let mut removed = IndexSet::from([id]);

        loop {
            let before = removed.len();
            for person in self.members.values() {
                if removed.contains(&person.id()) {
                    continue;
                }
                let descends = person
                    .parents()
                    .is_some_and(|parents| parents.ids().any(|parent| removed.contains(&parent)));
                let married_in = matches!(
                    person.relation(),
                    Relation::Spouse { partner } if removed.contains(&partner)
                );
                if descends || married_in {
                    removed.insert(person.id());
                }
            }
            if removed.len() == before {
                break;
            }
        }

        debug!(id = id.get(), count = removed.len(); "Cascade collected");
        removed
    }
}

/// Drops every reference `person` holds to a removed member.
fn detach(person: &mut Person, removed: &IndexSet<PersonId>) {
    if person.spouse().is_some_and(|spouse| removed.contains(&spouse)) {
        person.set_spouse(None);
    }

    let relation = person.relation();
    let detached = match relation {
        Relation::Spouse { partner } if removed.contains(&partner) => Relation::Orphan,
        Relation::Child { parents } | Relation::Sibling { parents } => removed
            .iter()
            .try_fold(parents, |parents, removed_id| parents.without(*removed_id))
            .map_or(Relation::Orphan, |parents| relation.with_parents(parents)),
        other => other,
    };

    if detached != relation {
        debug!(id = person.id().get(), relation = detached.label(); "Member detached");
        person.set_relation(detached);
    }
}

#[cfg(test)]
mod tests {
    use kinship_core::person::Parents;

    use super::*;
    use crate::config::StoreConfig;

    fn cascade_store() -> FamilyStore {
        FamilyStore::new(StoreConfig::new(false, DeletePolicy::Cascade))
    }

    fn assert_no_dangling_references(store: &FamilyStore, removed: &[PersonId]) {
        for person in store.members() {
            for id in removed {
                assert!(!person.has_parent(*id), "{} still has parent {id}", person.id());
                assert_ne!(person.spouse(), Some(*id), "{} still married to {id}", person.id());
                assert_ne!(person.relation(), Relation::Spouse { partner: *id });
            }
        }
    }

    #[test]
    fn test_delete_unknown_member() {
        let mut store = FamilyStore::default();
        assert_eq!(
            store.delete_member(PersonId::new(7)),
            Err(StoreError::NotFound(PersonId::new(7)))
        );
    }

    #[test]
    fn test_delete_spouse_clears_link_and_parent_sets() {
        let mut store = FamilyStore::default();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let carol = store.add_spouse("Carol", bob).unwrap();
        let dana = store.add_child("Dana", &[bob, carol]).unwrap();
        let erin = store.add_child("Erin", &[carol]).unwrap();

        assert_eq!(store.delete_member(carol), Ok(vec![carol]));

        assert_eq!(store.get(bob).unwrap().spouse(), None);
        assert_eq!(store.get(dana).unwrap().parents(), Some(Parents::One(bob)));
        assert_eq!(store.get(erin).unwrap().relation(), Relation::Orphan);
        assert_no_dangling_references(&store, &[carol]);

        // Bob is free to marry again.
        assert!(store.add_spouse("Finn", bob).is_ok());
    }

    #[test]
    fn test_delete_member_orphans_children_and_spouse() {
        let mut store = FamilyStore::default();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let carol = store.add_spouse("Carol", bob).unwrap();
        let gil = store.add_child("Gil", &[bob]).unwrap();
        let dana = store.add_child("Dana", &[bob, carol]).unwrap();

        store.delete_member(bob).unwrap();

        assert_eq!(store.get(carol).unwrap().relation(), Relation::Orphan);
        assert_eq!(store.get(carol).unwrap().spouse(), None);
        assert_eq!(store.get(gil).unwrap().relation(), Relation::Orphan);
        assert_eq!(store.get(dana).unwrap().parents(), Some(Parents::One(carol)));
        assert_eq!(store.root().map(Person::id), Some(alice));
        assert_no_dangling_references(&store, &[bob]);
    }

    #[test]
    fn test_delete_root_under_orphan_policy() {
        let mut store = FamilyStore::default();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();

        assert_eq!(
            store.delete_member(alice),
            Err(StoreError::CannotDeleteRootWithDescendants(alice))
        );
        assert_eq!(store.len(), 2);

        store.delete_member(bob).unwrap();
        assert_eq!(store.delete_member(alice), Ok(vec![alice]));
        assert!(store.is_empty());

        // Ids are never reused, and a fresh root may be added.
        assert_eq!(store.add_root("Zoe"), Ok(PersonId::new(3)));
    }

    #[test]
    fn test_cascade_removes_descendants_and_married_in_partners() {
        let mut store = cascade_store();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let carol = store.add_spouse("Carol", bob).unwrap();
        let dana = store.add_child("Dana", &[bob, carol]).unwrap();
        let hal = store.add_spouse("Hal", dana).unwrap();
        let ivy = store.add_child("Ivy", &[hal]).unwrap();
        let kit = store.add_child("Kit", &[alice]).unwrap();

        let removed = store.delete_member(bob).unwrap();

        assert_eq!(removed, vec![bob, carol, dana, hal, ivy]);
        assert_eq!(
            store.members().map(Person::id).collect::<Vec<_>>(),
            vec![alice, kit]
        );
        assert_no_dangling_references(&store, &removed);
    }

    #[test]
    fn test_cascade_on_spouse_keeps_partner() {
        let mut store = cascade_store();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let carol = store.add_spouse("Carol", bob).unwrap();
        let dana = store.add_child("Dana", &[bob, carol]).unwrap();

        let removed = store.delete_member(carol).unwrap();

        assert_eq!(removed, vec![carol, dana]);
        assert_eq!(store.get(bob).unwrap().spouse(), None);
    }

    #[test]
    fn test_cascade_on_root_empties_store() {
        let mut store = cascade_store();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        store.add_spouse("Carol", alice).unwrap();

        let removed = store.delete_member(alice).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(store.is_empty());
        assert!(store.get(bob).is_none());
    }

    #[test]
    fn test_delete_bumps_revision() {
        let mut store = FamilyStore::default();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let revision = store.revision();

        store.delete_member(bob).unwrap();
        assert_eq!(store.revision(), revision + 1);

        let _ = store.delete_member(bob);
        assert_eq!(store.revision(), revision + 1);
    }
}

//! Structural checks run on a snapshot before anything is placed.

use std::collections::HashMap;

use log::trace;

use kinship_core::{
    identifier::PersonId,
    person::{Person, Relation},
};

use super::{LayoutError, Roster};

/// Validates the snapshot and returns the root.
///
/// Checks, in order: every reference resolves, spouse links are symmetric,
/// parent chains are acyclic, and exactly one member is the root.
pub(super) fn check(roster: &Roster<'_>) -> Result<PersonId, LayoutError> {
    for person in roster.values() {
        check_references(roster, person)?;
    }
    for person in roster.values() {
        check_marriage(roster, person)?;
    }
    check_acyclic(roster)?;

    let roots: Vec<PersonId> = roster
        .values()
        .filter(|person| person.is_root())
        .map(|person| person.id())
        .collect();

    match roots.as_slice() {
        [] => Err(LayoutError::NoRoot),
        [root] => Ok(*root),
        _ => Err(LayoutError::AmbiguousRoot(roots)),
    }
}

fn check_references(roster: &Roster<'_>, person: &Person) -> Result<(), LayoutError> {
    let partner = match person.relation() {
        Relation::Spouse { partner } => Some(partner),
        _ => None,
    };

    person
        .parents()
        .into_iter()
        .flat_map(|parents| parents.ids())
        .chain(person.spouse())
        .chain(partner)
        .find(|id| !roster.contains_key(id))
        .map_or(Ok(()), |missing| {
            Err(LayoutError::MissingReference {
                person: person.id(),
                missing,
            })
        })
}

fn check_marriage(roster: &Roster<'_>, person: &Person) -> Result<(), LayoutError> {
    if let Some(spouse) = person.spouse() {
        let reciprocal = roster.get(&spouse).and_then(|other| other.spouse());
        if reciprocal != Some(person.id()) {
            return Err(LayoutError::AsymmetricSpouse {
                person: person.id(),
                spouse,
            });
        }
    }

    if let Relation::Spouse { partner } = person.relation() {
        if person.spouse() != Some(partner) {
            return Err(LayoutError::AsymmetricSpouse {
                person: person.id(),
                spouse: partner,
            });
        }
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Open,
    Done,
}

/// Depth-first search over parent links with an explicit stack.
fn check_acyclic(roster: &Roster<'_>) -> Result<(), LayoutError> {
    let mut marks: HashMap<PersonId, Mark> = HashMap::with_capacity(roster.len());

    for &start in roster.keys() {
        if marks.contains_key(&start) {
            continue;
        }

        // (member, parents still to visit)
        let mut stack: Vec<(PersonId, Vec<PersonId>)> = vec![(start, parents_of(roster, start))];
        marks.insert(start, Mark::Open);

        while let Some((id, pending)) = stack.last_mut() {
            let Some(parent) = pending.pop() else {
                marks.insert(*id, Mark::Done);
                stack.pop();
                continue;
            };

            match marks.get(&parent) {
                Some(Mark::Open) => {
                    trace!(id = parent.get(); "Parent cycle found");
                    return Err(LayoutError::CycleDetected(parent));
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(parent, Mark::Open);
                    stack.push((parent, parents_of(roster, parent)));
                }
            }
        }
    }

    Ok(())
}

fn parents_of(roster: &Roster<'_>, id: PersonId) -> Vec<PersonId> {
    roster
        .get(&id)
        .and_then(|person| person.parents())
        .map(|parents| parents.ids().collect())
        .unwrap_or_default()
}

//! Deterministic top-down tree placement.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use kinship_core::{
    geometry::{Point, Size},
    identifier::PersonId,
    person::{Person, Relation},
};

use super::{
    LayoutError, Roster, integrity,
    result::{EdgeKind, LayoutEdge, LayoutResult, PositionedNode, TreeLayout},
};
use crate::config::LayoutConfig;

/// Lays out a family tree snapshot.
///
/// The root is placed at the origin; each generation sits one vertical
/// spacing below its parents. Children are spread symmetrically under their
/// parent, or under the midpoint of a married couple. Married-in spouses are
/// placed beside their partner and never walked on their own. Floating
/// subtrees (orphans) follow to the right of the main tree, and the finished
/// layout is centered on x = 0.
#[derive(Debug, Clone)]
pub struct TreeEngine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    spouse_offset: f32,
    node_size: Size,
}

impl Default for TreeEngine {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl TreeEngine {
    /// Creates an engine with the spacing of `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            spouse_offset: config.spouse_offset(),
            node_size: config.node_size(),
        }
    }

    /// Lays out the given members.
    ///
    /// The input order does not matter; members are processed by ascending id.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when the snapshot is structurally broken:
    /// a dangling reference, a one-sided marriage, a parent cycle, a missing
    /// or duplicated root, or a member that cannot be reached.
    pub fn calculate<'a>(
        &self,
        people: impl IntoIterator<Item = &'a Person>,
    ) -> Result<LayoutResult, LayoutError> {
        let mut roster: Roster<'a> = people.into_iter().map(|person| (person.id(), person)).collect();
        if roster.is_empty() {
            debug!("Empty tree, nothing to lay out");
            return Ok(LayoutResult::Empty);
        }
        roster.sort_unstable_keys();

        let root = integrity::check(&roster)?;

        let mut walk = Walk::new(self, &roster);
        walk.place_subtree(root)?;

        let floating: Vec<PersonId> = roster
            .values()
            .filter(|person| person.relation() == Relation::Orphan)
            .map(|person| person.id())
            .collect();
        for orphan in floating {
            walk.place_floating(orphan)?;
        }

        if let Some(unplaced) = roster.keys().find(|id| !walk.nodes.contains_key(*id)) {
            return Err(LayoutError::Unreachable(*unplaced));
        }

        let Walk { mut nodes, edges, .. } = walk;
        center_horizontally(&mut nodes);

        debug!(nodes = nodes.len(), edges = edges.len(); "Tree laid out");
        Ok(LayoutResult::Tree(TreeLayout::new(nodes, edges, self.node_size)))
    }
}

/// Mutable state of one layout pass.
struct Walk<'e, 'a> {
    engine: &'e TreeEngine,
    roster: &'e Roster<'a>,
    /// Children of every member, ascending id.
    children: HashMap<PersonId, Vec<PersonId>>,
    visited: HashSet<PersonId>,
    nodes: IndexMap<PersonId, PositionedNode>,
    edges: Vec<LayoutEdge>,
}

impl<'e, 'a> Walk<'e, 'a> {
    fn new(engine: &'e TreeEngine, roster: &'e Roster<'a>) -> Self {
        let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        for person in roster.values() {
            for parent in person.parents().into_iter().flat_map(|parents| parents.ids()) {
                children.entry(parent).or_default().push(person.id());
            }
        }

        Self {
            engine,
            roster,
            children,
            visited: HashSet::with_capacity(roster.len()),
            nodes: IndexMap::with_capacity(roster.len()),
            edges: Vec::new(),
        }
    }

    /// Places a floating subtree to the right of everything placed so far.
    fn place_floating(&mut self, id: PersonId) -> Result<(), LayoutError> {
        let start = self.nodes.len();
        let right_edge = self
            .nodes
            .values()
            .map(|node| node.position().x())
            .reduce(f32::max);

        self.place_subtree(id)?;

        let Some(right_edge) = right_edge else {
            return Ok(());
        };
        let left_edge = self
            .nodes
            .values()
            .skip(start)
            .map(|node| node.position().x())
            .fold(f32::INFINITY, f32::min);
        let dx = right_edge + self.engine.horizontal_spacing - left_edge;

        trace!(id = id.get(), dx; "Floating subtree shifted");
        for node in self.nodes.values_mut().skip(start) {
            node.shift_x(dx);
        }
        Ok(())
    }

    fn place_subtree(&mut self, id: PersonId) -> Result<(), LayoutError> {
        self.place(id, Point::default())
    }

    fn place(&mut self, id: PersonId, position: Point) -> Result<(), LayoutError> {
        let person = self.visit(id, position, false)?;

        let mut anchor = position.x();
        let mut family = self.children_of(id);

        if let Some(spouse) = person.spouse().and_then(|spouse| self.married_in(spouse, id)) {
            let spouse_position = position.add_point(Point::new(self.engine.spouse_offset, 0.0));
            self.visit(spouse.id(), spouse_position, true)?;
            self.edges
                .push(LayoutEdge::new(id, spouse.id(), EdgeKind::Spouse));

            anchor = position.midpoint(spouse_position).x();
            family.extend(self.children_of(spouse.id()));
            family.sort_unstable();
            family.dedup();
        }

        if family.is_empty() {
            return Ok(());
        }

        let y = position.y() + self.engine.vertical_spacing;
        let spacing = self.engine.horizontal_spacing;
        let span = (family.len().max(2) - 1) as f32 * spacing;
        let left = if family.len() == 1 {
            anchor
        } else {
            anchor - span / 2.0
        };

        let mut previous: Option<PersonId> = None;
        for (index, &child) in family.iter().enumerate() {
            let child_position = Point::new(left + index as f32 * spacing, y);

            if let Some(parents) = self.roster.get(&child).and_then(|person| person.parents()) {
                for parent in parents.ids() {
                    self.edges
                        .push(LayoutEdge::new(parent, child, EdgeKind::ParentChild));
                }
            }
            if let Some(previous) = previous {
                self.edges
                    .push(LayoutEdge::new(previous, child, EdgeKind::SiblingGuide));
            }
            previous = Some(child);

            self.place(child, child_position)?;
        }

        Ok(())
    }

    /// Records a node, failing if the member was placed before.
    fn visit(
        &mut self,
        id: PersonId,
        position: Point,
        is_spouse: bool,
    ) -> Result<&'a Person, LayoutError> {
        if !self.visited.insert(id) {
            return Err(LayoutError::CycleDetected(id));
        }
        let person: &'a Person = self
            .roster
            .get(&id)
            .copied()
            .ok_or(LayoutError::Unreachable(id))?;

        trace!(id = id.get(), x = position.x(), y = position.y(), is_spouse; "Member placed");
        self.nodes
            .insert(id, PositionedNode::new(id, person.name(), position, is_spouse));
        Ok(person)
    }

    /// Returns `spouse` if it joined the tree by marrying `partner`.
    fn married_in(&self, spouse: PersonId, partner: PersonId) -> Option<&'a Person> {
        self.roster
            .get(&spouse)
            .copied()
            .filter(|person| person.relation() == Relation::Spouse { partner })
    }

    fn children_of(&self, id: PersonId) -> Vec<PersonId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }
}

/// Translates all nodes so their horizontal extent is symmetric about x = 0.
fn center_horizontally(nodes: &mut IndexMap<PersonId, PositionedNode>) {
    let (min_x, max_x) = nodes
        .values()
        .map(|node| node.position().x())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    if !min_x.is_finite() {
        return;
    }

    let dx = -(min_x + max_x) / 2.0;
    for node in nodes.values_mut() {
        node.shift_x(dx);
    }
}

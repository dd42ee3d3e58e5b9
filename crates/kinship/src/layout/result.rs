//! Output of the layout engine.

use indexmap::IndexMap;

use kinship_core::{
    geometry::{Bounds, Point, Size},
    identifier::PersonId,
};

/// Outcome of laying out a store.
///
/// An empty store is not an error: it produces [`LayoutResult::Empty`], which
/// a renderer shows as a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutResult {
    Empty,
    Tree(TreeLayout),
}

impl LayoutResult {
    /// Returns true for the empty-tree sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the positioned tree, if there is one.
    pub fn tree(&self) -> Option<&TreeLayout> {
        match self {
            Self::Empty => None,
            Self::Tree(tree) => Some(tree),
        }
    }
}

/// Classification of a drawn connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// From a parent down to its child.
    ParentChild,
    /// From a member to its married-in spouse.
    Spouse,
    /// Between neighbouring children of one row.
    SiblingGuide,
}

/// A connection between two positioned members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEdge {
    from: PersonId,
    to: PersonId,
    kind: EdgeKind,
}

impl LayoutEdge {
    pub(super) fn new(from: PersonId, to: PersonId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }

    /// Returns the source member.
    pub fn from(&self) -> PersonId {
        self.from
    }

    /// Returns the target member.
    pub fn to(&self) -> PersonId {
        self.to
    }

    /// Returns the edge classification.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// A member with its center position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: PersonId,
    name: String,
    position: Point,
    is_spouse: bool,
}

impl PositionedNode {
    pub(super) fn new(id: PersonId, name: &str, position: Point, is_spouse: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            position,
            is_spouse,
        }
    }

    /// Returns the member id.
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the center of the node.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns true if the member was placed beside its partner as a married-in spouse.
    pub fn is_spouse(&self) -> bool {
        self.is_spouse
    }

    pub(super) fn shift_x(&mut self, dx: f32) {
        self.position = self.position.with_x(self.position.x() + dx);
    }
}

/// A fully positioned tree.
///
/// Nodes are kept in placement order and can be looked up by id.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    nodes: IndexMap<PersonId, PositionedNode>,
    edges: Vec<LayoutEdge>,
    node_size: Size,
}

impl TreeLayout {
    pub(super) fn new(
        nodes: IndexMap<PersonId, PositionedNode>,
        edges: Vec<LayoutEdge>,
        node_size: Size,
    ) -> Self {
        Self {
            nodes,
            edges,
            node_size,
        }
    }

    /// Returns the nodes in placement order.
    pub fn nodes(&self) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.values()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Looks a node up by member id.
    pub fn node(&self, id: PersonId) -> Option<&PositionedNode> {
        self.nodes.get(&id)
    }

    /// Returns the edges in emission order.
    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Returns the size of every node box.
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Returns the box drawn for a node.
    pub fn node_bounds(&self, node: &PositionedNode) -> Bounds {
        node.position().to_bounds(self.node_size)
    }

    /// Returns the bounding box of all node boxes.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .values()
            .map(|node| self.node_bounds(node))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}

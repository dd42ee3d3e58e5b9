//! Layout of a family tree snapshot.
//!
//! ```text
//! members ──► integrity ──► placement ──► floating subtrees ──► centering ──► LayoutResult
//! ```
//!
//! Layout is a pure function of the members it is given: it never touches the
//! store, and the same members always produce the same nodes and edges.

mod engine;
mod error;
mod integrity;
mod result;

pub use engine::TreeEngine;
pub use error::LayoutError;
pub use result::{EdgeKind, LayoutEdge, LayoutResult, PositionedNode, TreeLayout};

use indexmap::IndexMap;

use kinship_core::{identifier::PersonId, person::Person};

/// Members of one snapshot by id, ascending.
type Roster<'a> = IndexMap<PersonId, &'a Person>;

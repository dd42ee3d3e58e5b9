//! Kinship - A family tree builder.
//!
//! A relationship store that keeps a family tree structurally valid, and a
//! layout engine that turns a snapshot of it into positioned nodes and edges.
//! Rendering is left to the caller; a reference SVG exporter is included.

pub mod config;
pub mod export;
pub mod layout;
pub mod request;
pub mod store;

mod error;

pub use kinship_core::{color, geometry, identifier, person};

pub use error::KinshipError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use identifier::PersonId;
use layout::{LayoutResult, TreeEngine};
use person::Person;
use request::{AddRelationshipRequest, DeleteRequest, SearchRequest};
use store::FamilyStore;

/// One family tree editing session.
///
/// Owns the store and the configuration used to lay it out and render it.
///
/// # Examples
///
/// ```rust
/// use kinship::{
///     FamilyTree,
///     request::{AddRelationshipRequest, RelationshipKind},
/// };
///
/// let mut tree = FamilyTree::default();
/// let alice = tree
///     .apply(&AddRelationshipRequest::new("Alice", RelationshipKind::Root))
///     .expect("Failed to add root");
/// tree.apply(&AddRelationshipRequest::new("Bob", RelationshipKind::Child).related_to([alice]))
///     .expect("Failed to add child");
///
/// let layout = tree.layout().expect("Failed to lay out");
/// assert_eq!(layout.tree().map(|tree| tree.node_count()), Some(2));
///
/// let svg = tree.render_svg().expect("Failed to render");
/// assert!(svg.contains("Bob"));
/// ```
#[derive(Debug, Default)]
pub struct FamilyTree {
    store: FamilyStore,
    config: AppConfig,
}

impl FamilyTree {
    /// Create an empty session with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Store policy, layout spacing and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: FamilyStore::new(config.store().clone()),
            config,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &FamilyStore {
        &self.store
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Adds a member as described by `request` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Store`] if the request is rejected; the tree
    /// is left unchanged.
    pub fn apply(&mut self, request: &AddRelationshipRequest) -> Result<PersonId, KinshipError> {
        info!(name = request.name(), relationship:% = request.relationship(); "Adding member");
        let id = self.store.apply(request)?;
        debug!(id = id.get(), revision = self.store.revision(); "Member added");
        Ok(id)
    }

    /// Deletes a member and returns every id that was removed.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Store`] if the member does not exist or cannot
    /// be deleted under the configured policy.
    pub fn delete(&mut self, request: &DeleteRequest) -> Result<Vec<PersonId>, KinshipError> {
        info!(id = request.id().get(); "Deleting member");
        Ok(self.store.delete_member(request.id())?)
    }

    /// Finds members by name.
    pub fn search(&self, request: &SearchRequest) -> Vec<&Person> {
        let found = self.store.find_by_name(request.query());
        debug!(query = request.query(), found = found.len(); "Search finished");
        found
    }

    /// Lays out the current tree.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Layout`] if the tree is structurally broken.
    pub fn layout(&self) -> Result<LayoutResult, KinshipError> {
        info!(members = self.store.len(), revision = self.store.revision(); "Calculating layout");
        let engine = TreeEngine::new(self.config.layout());
        let layout = engine.calculate(self.store.members())?;
        trace!(layout:?; "Layout result");
        Ok(layout)
    }

    /// Lays out the current tree and renders it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::Layout`] for a broken tree, or
    /// [`KinshipError::Export`] if a style color is invalid.
    pub fn render_svg(&self) -> Result<String, KinshipError> {
        let layout = self.layout()?;

        let exporter = SvgBuilder::new().with_style(self.config.style()).build()?;
        let mut output = Vec::new();
        exporter.export_layout(&layout, &mut output)?;

        let svg = String::from_utf8(output)
            .map_err(|err| export::Error::Render(format!("SVG output is not UTF-8: {err}")))?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}

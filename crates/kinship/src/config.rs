//! Configuration types for Kinship sessions.
//!
//! This module provides configuration structures that control store policy,
//! tree layout and SVG styling. All types implement [`serde::Deserialize`]
//! so they can be loaded from a TOML file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`StoreConfig`] - Name uniqueness and deletion policy of the relationship store.
//! - [`LayoutConfig`] - Spacing and node dimensions used by the layout engine.
//! - [`StyleConfig`] - Colors used by the SVG export.
//!
//! # Example
//!
//! ```
//! # use kinship::config::{AppConfig, DeletePolicy};
//! let config = AppConfig::default();
//! assert!(!config.store().unique_names());
//! assert_eq!(config.store().delete_policy(), DeletePolicy::Orphan);
//! assert!(config.style().node_fill().is_ok());
//! ```

use serde::Deserialize;

use kinship_core::{color::Color, geometry::Size};

/// Top-level configuration combining store, layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Store policy section.
    #[serde(default)]
    store: StoreConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `store` - Store policy settings.
    /// * `layout` - Layout spacing settings.
    /// * `style` - Visual styling options.
    pub fn new(store: StoreConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            store,
            layout,
            style,
        }
    }

    /// Returns the store configuration.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// What happens to the relatives of a deleted member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Only the member is removed. Children left without parents float as
    /// orphans. The root cannot be deleted while other members exist.
    #[default]
    Orphan,
    /// The member, its descendants and its married-in partners are removed.
    Cascade,
}

/// Relationship store policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Reject names already carried by another member.
    #[serde(default)]
    unique_names: bool,

    /// Deletion policy.
    #[serde(default)]
    delete_policy: DeletePolicy,
}

impl StoreConfig {
    /// Creates a new [`StoreConfig`].
    pub fn new(unique_names: bool, delete_policy: DeletePolicy) -> Self {
        Self {
            unique_names,
            delete_policy,
        }
    }

    /// Returns whether member names must be unique.
    pub fn unique_names(&self) -> bool {
        self.unique_names
    }

    /// Returns the deletion policy.
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }
}

/// Spacing and node dimensions used by the layout engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring children of one row.
    horizontal_spacing: f32,

    /// Distance between generations.
    vertical_spacing: f32,

    /// Horizontal offset of a spouse from its partner.
    spouse_offset: f32,

    /// Width of a node box.
    node_width: f32,

    /// Height of a node box.
    node_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 160.0,
            vertical_spacing: 120.0,
            spouse_offset: 140.0,
            node_width: 120.0,
            node_height: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] with the given spacing and default node size.
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32, spouse_offset: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
            spouse_offset,
            ..Self::default()
        }
    }

    /// Sets the node box size.
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_width = size.width();
        self.node_height = size.height();
        self
    }

    /// Returns the distance between neighbouring children.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Returns the distance between generations.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Returns the horizontal offset of a spouse from its partner.
    pub fn spouse_offset(&self) -> f32 {
        self.spouse_offset
    }

    /// Returns the node box size.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }
}

/// Visual styling configuration for the SVG export.
///
/// Colors are CSS color strings. Unset fields fall back to defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color of the drawing; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill of members with lineage in the tree.
    #[serde(default)]
    node_fill: Option<String>,

    /// Fill of married-in members.
    #[serde(default)]
    spouse_fill: Option<String>,

    /// Stroke of node borders and connecting lines.
    #[serde(default)]
    edge_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the fill for members with lineage.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn node_fill(&self) -> Result<Color, String> {
        parse_or(self.node_fill.as_deref(), "#e8f0fe", "node fill")
    }

    /// Returns the fill for married-in members.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn spouse_fill(&self) -> Result<Color, String> {
        parse_or(self.spouse_fill.as_deref(), "#fde8ef", "spouse fill")
    }

    /// Returns the stroke color for borders and lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_or(self.edge_color.as_deref(), "#3c4043", "edge color")
    }
}

fn parse_or(value: Option<&str>, fallback: &str, what: &str) -> Result<Color, String> {
    Color::new(value.unwrap_or(fallback)).map_err(|err| format!("Invalid {what} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().horizontal_spacing(), 160.0);
        assert_eq!(config.layout().vertical_spacing(), 120.0);
        assert_eq!(config.layout().spouse_offset(), 140.0);
        assert_eq!(config.layout().node_size(), Size::new(120.0, 40.0));
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            unique_names = true
            delete_policy = "cascade"

            [layout]
            vertical_spacing = 80.0
            "#,
        )
        .unwrap();

        assert!(config.store().unique_names());
        assert_eq!(config.store().delete_policy(), DeletePolicy::Cascade);
        assert_eq!(config.layout().vertical_spacing(), 80.0);
        assert_eq!(config.layout().horizontal_spacing(), 160.0);
    }

    #[test]
    fn test_invalid_style_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            node_fill = "definitely-not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().node_fill().unwrap_err();
        assert!(err.contains("node fill"));
        assert!(config.style().spouse_fill().is_ok());
    }

    #[test]
    fn test_layout_config_builder() {
        let config = LayoutConfig::new(100.0, 50.0, 80.0).with_node_size(Size::new(60.0, 20.0));
        assert_eq!(config.horizontal_spacing(), 100.0);
        assert_eq!(config.vertical_spacing(), 50.0);
        assert_eq!(config.spouse_offset(), 80.0);
        assert_eq!(config.node_size(), Size::new(60.0, 20.0));
    }
}

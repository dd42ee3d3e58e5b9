//! SVG rendering of a [`LayoutResult`].

use std::io;

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use kinship_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{EdgeKind, LayoutEdge, LayoutResult, PositionedNode, TreeLayout},
};

const MARGIN: f32 = 40.0;
const CORNER_RADIUS: f32 = 6.0;
const FONT_FAMILY: &str = "Arial";
const FONT_SIZE: f32 = 14.0;
/// Distance of a sibling guide above the top edge of the children it joins.
const GUIDE_RISE: f32 = 12.0;
const EMPTY_MESSAGE: &str = "No family members yet";
const EMPTY_WIDTH: f32 = 320.0;
const EMPTY_HEIGHT: f32 = 80.0;

/// Builder for [`Svg`], resolving the style colors up front.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Parses the configured colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            background: style.background_color().map_err(Error::Render)?,
            node_fill: style.node_fill().map_err(Error::Render)?,
            spouse_fill: style.spouse_fill().map_err(Error::Render)?,
            edge_color: style.edge_color().map_err(Error::Render)?,
        })
    }
}

/// SVG exporter with resolved colors.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    node_fill: Color,
    spouse_fill: Color,
    edge_color: Color,
}

impl Svg {
    /// Renders a layout result to an SVG document.
    pub fn render(&self, layout: &LayoutResult) -> Document {
        match layout {
            LayoutResult::Empty => self.render_empty(),
            LayoutResult::Tree(tree) => self.render_tree(tree),
        }
    }

    fn render_empty(&self) -> Document {
        let canvas = Bounds::new_from_top_left(Point::default(), Size::new(EMPTY_WIDTH, EMPTY_HEIGHT));
        let center = canvas.center();

        let message = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", FONT_SIZE)
            .set("fill", &self.edge_color)
            .add(SvgText::new(EMPTY_MESSAGE));

        self.new_document(canvas).add(message)
    }

    fn render_tree(&self, tree: &TreeLayout) -> Document {
        let canvas = tree.bounds().add_padding(Insets::uniform(MARGIN));
        debug!(width = canvas.width(), height = canvas.height(); "SVG canvas sized");

        let mut edges = svg_element::Group::new()
            .set("stroke", &self.edge_color)
            .set("stroke-width", 1.5);
        for edge in tree.edges() {
            if let Some(line) = self.render_edge(tree, edge) {
                edges = edges.add(line);
            }
        }

        let mut nodes = svg_element::Group::new();
        for node in tree.nodes() {
            nodes = nodes.add(self.render_node(tree, node));
        }

        self.new_document(canvas).add(edges).add(nodes)
    }

    fn new_document(&self, canvas: Bounds) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                (canvas.min_x(), canvas.min_y(), canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = &self.background {
            let min = canvas.min_point();
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", min.x())
                    .set("y", min.y())
                    .set("width", canvas.width())
                    .set("height", canvas.height())
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }
        doc
    }

    fn render_node(&self, tree: &TreeLayout, node: &PositionedNode) -> svg_element::Group {
        let bounds = tree.node_bounds(node);
        let min = bounds.min_point();
        let fill = if node.is_spouse() {
            &self.spouse_fill
        } else {
            &self.node_fill
        };

        let rect = svg_element::Rectangle::new()
            .set("x", min.x())
            .set("y", min.y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", fill)
            .set("fill-opacity", fill.alpha())
            .set("stroke", &self.edge_color);

        let label = svg_element::Text::new("")
            .set("x", node.position().x())
            .set("y", node.position().y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", FONT_SIZE)
            .add(SvgText::new(node.name()));

        svg_element::Group::new()
            .set("data-person", node.id().get())
            .add(rect)
            .add(label)
    }

    fn render_edge(&self, tree: &TreeLayout, edge: &LayoutEdge) -> Option<svg_element::Line> {
        let from = tree.node_bounds(tree.node(edge.from())?);
        let to = tree.node_bounds(tree.node(edge.to())?);

        let (start, end) = match edge.kind() {
            EdgeKind::ParentChild => (
                Point::new(from.center().x(), from.max_y()),
                Point::new(to.center().x(), to.min_y()),
            ),
            EdgeKind::Spouse => (
                Point::new(from.max_x(), from.center().y()),
                Point::new(to.min_x(), to.center().y()),
            ),
            EdgeKind::SiblingGuide => (
                Point::new(from.center().x(), from.min_y() - GUIDE_RISE),
                Point::new(to.center().x(), to.min_y() - GUIDE_RISE),
            ),
        };

        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y());

        Some(if edge.kind() == EdgeKind::SiblingGuide {
            line.set("stroke-dasharray", "4 4")
        } else {
            line
        })
    }
}

impl Exporter for Svg {
    fn export_layout(
        &self,
        layout: &LayoutResult,
        output: &mut dyn io::Write,
    ) -> Result<(), Error> {
        let doc = self.render(layout);
        debug!("SVG document rendered");

        if let Err(err) = write!(output, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        info!("SVG written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kinship_core::person::Person;

    use super::*;
    use crate::{layout::TreeEngine, store::FamilyStore};

    fn export(layout: &LayoutResult) -> String {
        let svg = SvgBuilder::new().build().unwrap();
        let mut output = Vec::new();
        svg.export_layout(layout, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_empty_layout_renders_placeholder() {
        let rendered = export(&LayoutResult::Empty);
        assert!(rendered.starts_with("<svg"));
        assert!(rendered.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_tree_renders_every_member_and_edge() {
        let mut store = FamilyStore::default();
        let alice = store.add_root("Alice").unwrap();
        let bob = store.add_child("Bob", &[alice]).unwrap();
        let carol = store.add_spouse("Carol", bob).unwrap();
        store.add_child("Dana", &[bob, carol]).unwrap();
        store.add_child("Eli", &[bob]).unwrap();

        let layout = TreeEngine::default().calculate(store.members()).unwrap();
        let rendered = export(&layout);

        for person in store.members().map(Person::name) {
            assert!(rendered.contains(person), "{person} missing from output");
        }
        assert_eq!(rendered.matches("<rect").count(), store.len());
        assert_eq!(rendered.matches("<line").count(), 6);
        assert_eq!(rendered.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn test_background_is_drawn_when_configured() {
        let style: StyleConfig = toml::from_str(r#"background_color = "white""#).unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let rendered = svg.render(&LayoutResult::Empty).to_string();
        assert_eq!(rendered.matches("<rect").count(), 1);
    }

    #[test]
    fn test_invalid_color_is_a_render_error() {
        let style: StyleConfig = toml::from_str(r#"node_fill = "not-a-color""#).unwrap();
        assert!(matches!(
            SvgBuilder::new().with_style(&style).build(),
            Err(Error::Render(_))
        ));
    }
}

// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surfaces and render outcomes.

use crate::node::{LinearGradient, Node};

/// The root of a render tree: a fixed-size drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Element id of the surface.
    pub id: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Gradient definitions referenced by paths.
    pub defs: Vec<LinearGradient>,
    /// Top-level nodes, painted in order.
    pub children: Vec<Node>,
}

impl Surface {
    /// Creates an empty surface.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            defs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a gradient definition.
    pub fn define(&mut self, gradient: LinearGradient) {
        self.defs.push(gradient);
    }

    /// Appends a top-level node.
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Visits every node in paint order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Returns every node (at any depth) whose class is `class`.
    pub fn nodes_with_class(&self, class: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if n.class() == Some(class) {
                out.push(n);
            }
        });
        out
    }

    /// Returns every path node (at any depth) whose class is `class`.
    pub fn paths_with_class(&self, class: &str) -> Vec<&Node> {
        self.nodes_with_class(class)
            .into_iter()
            .filter(|n| matches!(n, Node::Path { .. }))
            .collect()
    }

    /// Serializes this surface as a standalone SVG document.
    pub fn to_svg_string(&self) -> String {
        crate::svg::surface_to_svg(self)
    }
}

/// Outcome of rendering a chart for a given input state.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    /// Input data is not available yet.
    Loading,
    /// Input data is available but there is nothing to draw.
    Empty,
    /// A complete chart.
    Chart(Surface),
}

impl Rendered {
    /// Returns the surface of a complete chart.
    pub fn surface(&self) -> Option<&Surface> {
        match self {
            Self::Chart(s) => Some(s),
            Self::Loading | Self::Empty => None,
        }
    }

    /// Consumes `self`, returning the surface of a complete chart.
    pub fn into_surface(self) -> Option<Surface> {
        match self {
            Self::Chart(s) => Some(s),
            Self::Loading | Self::Empty => None,
        }
    }

    /// Returns `true` for [`Rendered::Loading`].
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` for [`Rendered::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Serializes to markup.
    ///
    /// `Empty` produces an empty string; `Loading` produces a small placeholder document.
    pub fn to_svg_string(&self) -> String {
        match self {
            Self::Chart(s) => s.to_svg_string(),
            Self::Empty => String::new(),
            Self::Loading => crate::svg::loading_svg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::BezPath;

    use super::*;
    use crate::Paint;

    #[test]
    fn class_queries_descend_into_groups() {
        let mut s = Surface::new("chart", 100.0, 50.0);
        s.push(
            Node::group("plot")
                .with_child(Node::filled("line-fill", BezPath::new(), Paint::None))
                .with_child(Node::group("line-fill")),
        );
        assert_eq!(s.nodes_with_class("line-fill").len(), 2);
        assert_eq!(s.paths_with_class("line-fill").len(), 1);
        assert!(s.paths_with_class("missing").is_empty());
    }

    #[test]
    fn empty_renders_to_nothing() {
        assert_eq!(Rendered::Empty.to_svg_string(), "");
        assert!(Rendered::Loading.to_svg_string().contains("loading"));
        assert!(Rendered::Loading.surface().is_none());
    }
}

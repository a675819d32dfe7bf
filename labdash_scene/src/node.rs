// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render tree nodes.

use kurbo::{BezPath, Point, Vec2};
use peniko::Color;

/// Paint for fills and strokes.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Paint {
    /// Nothing is painted.
    #[default]
    None,
    /// A solid color.
    Solid(Color),
    /// A reference to a [`LinearGradient`] defined on the surface, by id.
    Gradient(String),
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor point is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor point is the alphabetic baseline.
    Alphabetic,
    /// The anchor point is the top of the text.
    Hanging,
}

/// A vertical linear gradient fading a single color from top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Element id, referenced by [`Paint::Gradient`].
    pub id: String,
    /// Gradient color.
    pub color: Color,
    /// Opacity at the top edge of the filled shape.
    pub top_opacity: f32,
    /// Opacity at the bottom edge of the filled shape.
    pub bottom_opacity: f32,
}

/// A node of the render tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A group of child nodes, optionally translated.
    Group {
        /// Optional class name, used by styling and by tree queries.
        class: Option<String>,
        /// Translation applied to every child.
        translate: Option<Vec2>,
        /// Child nodes, painted in order.
        children: Vec<Node>,
    },
    /// A filled and/or stroked path.
    Path {
        /// Optional class name.
        class: Option<String>,
        /// Path geometry in the coordinate space of the enclosing group.
        path: BezPath,
        /// Fill paint.
        fill: Paint,
        /// Stroke paint.
        stroke: Paint,
        /// Stroke width; ignored when `stroke` is [`Paint::None`].
        stroke_width: f64,
    },
    /// A single line of text.
    Text {
        /// Optional class name.
        class: Option<String>,
        /// Anchor position.
        pos: Point,
        /// Text content.
        text: String,
        /// Horizontal anchor.
        anchor: TextAnchor,
        /// Vertical baseline.
        baseline: TextBaseline,
        /// Font size in pixels.
        font_size: f64,
        /// Fill paint.
        fill: Paint,
    },
}

impl Node {
    /// Creates an empty group with a class name.
    pub fn group(class: impl Into<String>) -> Self {
        Self::Group {
            class: Some(class.into()),
            translate: None,
            children: Vec::new(),
        }
    }

    /// Creates an unnamed group wrapping `children`.
    pub fn group_of(children: Vec<Self>) -> Self {
        Self::Group {
            class: None,
            translate: None,
            children,
        }
    }

    /// Creates a stroked path with no fill.
    pub fn stroked(
        class: impl Into<String>,
        path: BezPath,
        stroke: impl Into<Paint>,
        stroke_width: f64,
    ) -> Self {
        Self::Path {
            class: Some(class.into()),
            path,
            fill: Paint::None,
            stroke: stroke.into(),
            stroke_width,
        }
    }

    /// Creates a filled path with no stroke.
    pub fn filled(class: impl Into<String>, path: BezPath, fill: impl Into<Paint>) -> Self {
        Self::Path {
            class: Some(class.into()),
            path,
            fill: fill.into(),
            stroke: Paint::None,
            stroke_width: 0.0,
        }
    }

    /// Sets the translation of a group. No-op on leaves.
    #[must_use]
    pub fn translated(mut self, offset: impl Into<Vec2>) -> Self {
        if let Self::Group { translate, .. } = &mut self {
            *translate = Some(offset.into());
        }
        self
    }

    /// Appends a child to a group. No-op on leaves.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        if let Self::Group { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Appends children to a group. No-op on leaves.
    #[must_use]
    pub fn with_children(mut self, more: impl IntoIterator<Item = Self>) -> Self {
        if let Self::Group { children, .. } = &mut self {
            children.extend(more);
        }
        self
    }

    /// Returns the class name, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Group { class, .. } | Self::Path { class, .. } | Self::Text { class, .. } => {
                class.as_deref()
            }
        }
    }

    /// Returns the children of a group, or an empty slice for leaves.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Visits this node and all descendants in paint order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

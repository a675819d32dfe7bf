// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render tree for labdash charts.
//!
//! Chart code never talks to a drawing backend directly. It builds a small, owned tree:
//! - a [`Surface`] sized in pixels, carrying gradient definitions,
//! - nested [`Node::Group`]s with optional translations,
//! - [`Node::Path`] and [`Node::Text`] leaves.
//!
//! The tree is plain data, so two renders with the same inputs compare equal, and it can be
//! serialized to an SVG document with [`Surface::to_svg_string`].

mod node;
mod surface;
mod svg;

pub use node::{LinearGradient, Node, Paint, TextAnchor, TextBaseline};
pub use surface::{Rendered, Surface};
pub use svg::{fmt_num, write_path_data};

// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization for render trees.
//!
//! Output is deterministic: nodes are written in tree order and numbers are rounded to
//! three decimals with trailing zeros trimmed.

use core::fmt::Write;

use kurbo::{BezPath, PathEl, Point};
use peniko::Color;

use crate::node::{LinearGradient, Node, Paint, TextAnchor, TextBaseline};
use crate::surface::Surface;

/// Formats a coordinate for SVG output.
///
/// Rounds to three decimals, trims trailing zeros and normalizes `-0` to `0`.
/// Non-finite values are written as `0`.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

fn push_point(out: &mut String, p: Point) {
    out.push_str(&fmt_num(p.x));
    out.push(',');
    out.push_str(&fmt_num(p.y));
}

/// Writes the `d` attribute value for a path.
pub fn write_path_data(path: &BezPath) -> String {
    let mut out = String::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.push('M');
                push_point(&mut out, p);
            }
            PathEl::LineTo(p) => {
                out.push('L');
                push_point(&mut out, p);
            }
            PathEl::QuadTo(p1, p2) => {
                out.push('Q');
                push_point(&mut out, p1);
                out.push(',');
                push_point(&mut out, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                out.push('C');
                push_point(&mut out, p1);
                out.push(',');
                push_point(&mut out, p2);
                out.push(',');
                push_point(&mut out, p3);
            }
            PathEl::ClosePath => out.push('Z'),
        }
    }
    out
}

fn color_hex(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let hex = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (hex, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, paint: &Paint) {
    match paint {
        Paint::None => {
            let _ = write!(out, r#" {name}="none""#);
        }
        Paint::Solid(color) => {
            let (hex, opacity) = color_hex(*color);
            let _ = write!(out, r#" {name}="{hex}""#);
            if let Some(o) = opacity {
                let _ = write!(out, r#" {name}-opacity="{}""#, fmt_num(o));
            }
        }
        Paint::Gradient(id) => {
            let _ = write!(out, r#" {name}="url(#{})""#, escape_xml(id));
        }
    }
}

fn write_class_attr(out: &mut String, class: Option<&str>) {
    if let Some(class) = class {
        let _ = write!(out, r#" class="{}""#, escape_xml(class));
    }
}

fn write_gradient(out: &mut String, g: &LinearGradient) {
    let (hex, _) = color_hex(g.color);
    let _ = writeln!(
        out,
        r#"<linearGradient id="{}" x1="0" x2="0" y1="0" y2="1">"#,
        escape_xml(&g.id)
    );
    let _ = writeln!(
        out,
        r#"<stop offset="0%" stop-color="{hex}" stop-opacity="{}"/>"#,
        fmt_num(f64::from(g.top_opacity))
    );
    let _ = writeln!(
        out,
        r#"<stop offset="100%" stop-color="{hex}" stop-opacity="{}"/>"#,
        fmt_num(f64::from(g.bottom_opacity))
    );
    out.push_str("</linearGradient>\n");
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Group {
            class,
            translate,
            children,
        } => {
            out.push_str("<g");
            write_class_attr(out, class.as_deref());
            if let Some(t) = translate {
                let _ = write!(
                    out,
                    r#" transform="translate({},{})""#,
                    fmt_num(t.x),
                    fmt_num(t.y)
                );
            }
            out.push_str(">\n");
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>\n");
        }
        Node::Path {
            class,
            path,
            fill,
            stroke,
            stroke_width,
        } => {
            out.push_str("<path");
            write_class_attr(out, class.as_deref());
            let _ = write!(out, r#" d="{}""#, write_path_data(path));
            write_paint_attr(out, "fill", fill);
            if *stroke != Paint::None && *stroke_width > 0.0 {
                write_paint_attr(out, "stroke", stroke);
                let _ = write!(out, r#" stroke-width="{}""#, fmt_num(*stroke_width));
            }
            out.push_str("/>\n");
        }
        Node::Text {
            class,
            pos,
            text,
            anchor,
            baseline,
            font_size,
            fill,
        } => {
            out.push_str("<text");
            write_class_attr(out, class.as_deref());
            let _ = write!(
                out,
                r#" x="{}" y="{}" font-size="{}""#,
                fmt_num(pos.x),
                fmt_num(pos.y),
                fmt_num(*font_size)
            );
            out.push_str(match anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            out.push_str(match baseline {
                TextBaseline::Middle => r#" dominant-baseline="middle""#,
                TextBaseline::Alphabetic => r#" dominant-baseline="alphabetic""#,
                TextBaseline::Hanging => r#" dominant-baseline="hanging""#,
            });
            write_paint_attr(out, "fill", fill);
            out.push('>');
            out.push_str(&escape_xml(text));
            out.push_str("</text>\n");
        }
    }
}

pub(crate) fn surface_to_svg(surface: &Surface) -> String {
    let mut out = String::new();
    let w = fmt_num(surface.width);
    let h = fmt_num(surface.height);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        escape_xml(&surface.id)
    );
    if !surface.defs.is_empty() {
        out.push_str("<defs>\n");
        for g in &surface.defs {
            write_gradient(&mut out, g);
        }
        out.push_str("</defs>\n");
    }
    for node in &surface.children {
        write_node(&mut out, node);
    }
    out.push_str("</svg>\n");
    out
}

pub(crate) fn loading_svg() -> String {
    concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="loading" width="48" height="16" viewBox="0 0 48 16">"#,
        "\n",
        r#"<circle cx="8" cy="8" r="4"/><circle cx="24" cy="8" r="4"/><circle cx="40" cy="8" r="4"/>"#,
        "\n</svg>\n"
    )
    .to_string()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn numbers_are_trimmed_and_normalized() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.25), "1.25");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(2.0 / 3.0), "0.667");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn path_data_uses_absolute_commands() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, -5.5));
        p.curve_to((1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
        p.close_path();
        assert_eq!(write_path_data(&p), "M0,0L10,-5.5C1,2,3,4,5,6Z");
    }

    #[test]
    fn surface_writes_defs_groups_and_escaped_text() {
        let mut s = Surface::new("chart_1", 640.0, 345.0);
        s.define(LinearGradient {
            id: "chart_1-gradient-0".into(),
            color: css::BLACK,
            top_opacity: 0.5,
            bottom_opacity: 0.0,
        });
        s.push(
            Node::group("plot")
                .translated(Vec2::new(10.0, 305.0))
                .with_child(Node::Text {
                    class: None,
                    pos: Point::new(1.0, 2.0),
                    text: "a<b".into(),
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    font_size: 10.0,
                    fill: Paint::Solid(css::BLACK),
                }),
        );
        let svg = s.to_svg_string();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"height="345""#));
        assert!(svg.contains(r#"<linearGradient id="chart_1-gradient-0""#));
        assert!(svg.contains(r#"transform="translate(10,305)""#));
        assert!(svg.contains("a&lt;b"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn gradient_paint_is_a_url_reference() {
        let mut out = String::new();
        write_paint_attr(&mut out, "fill", &Paint::Gradient("g-1".into()));
        assert_eq!(out, r#" fill="url(#g-1)""#);
    }
}

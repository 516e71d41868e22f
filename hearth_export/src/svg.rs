// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

use hearth_core::{Mark, MarkPayload, Scene, StrokeDash, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;

const FONT_FAMILY: &str = "sans-serif";

/// Serializes `scene` into a standalone SVG document.
///
/// The document covers the scene's view rectangle. Marks are written in `(z_index, id)` order,
/// with the background (if any) painted first.
pub fn to_svg(scene: &Scene) -> String {
    let view = scene.view;
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');

    if let Some(background) = &scene.background {
        write_rect(&mut out, view, background);
        out.push_str("/>\n");
    }

    for mark in scene.sorted() {
        write_mark(&mut out, mark);
    }

    out.push_str("</svg>\n");
    out
}

fn write_mark(out: &mut String, mark: &Mark) {
    if mark.opacity <= 0.0 {
        return;
    }
    match &mark.payload {
        MarkPayload::Rect(r) => {
            write_rect(out, r.rect, &r.fill);
            write_opacity(out, mark.opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Circle(c) => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            ));
            write_paint_attr(out, "fill", &c.fill);
            write_opacity(out, mark.opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Path(p) => {
            let d = p.path.to_svg();
            out.push_str(&format!(r#"<path d="{d}""#));
            match &p.fill {
                Some(fill) => write_paint_attr(out, "fill", fill),
                None => out.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = &p.stroke
                && p.stroke_width > 0.0
            {
                write_paint_attr(out, "stroke", stroke);
                out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                out.push_str(r#" stroke-linejoin="round" stroke-linecap="round""#);
                if let Some(dash) = &p.dash {
                    write_dash(out, dash);
                }
            }
            write_opacity(out, mark.opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                ));
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            if t.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            write_paint_attr(out, "fill", &t.fill);
            write_opacity(out, mark.opacity);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
}

fn write_rect(out: &mut String, rect: Rect, fill: &Brush) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
    ));
    write_paint_attr(out, "fill", fill);
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
}

fn write_dash(out: &mut String, dash: &StrokeDash) {
    if dash.array.is_empty() {
        return;
    }
    let array: Vec<String> = dash.array.iter().map(f64::to_string).collect();
    out.push_str(&format!(
        r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
        array.join(" "),
        dash.offset
    ));
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
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

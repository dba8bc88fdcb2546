//! Minimal retained-mode SVG scene graph.
//!
//! Nodes form a tree owned by the root. [`render_svg`] walks it depth first, writing one element
//! per line; containers emit their open tag, their children in order, then the close tag.
//! Images are inlined from a [`PhotoStore`], so rendering itself does no IO.

use std::fmt::Write as _;

use crate::{
    assets::PhotoStore,
    error::GridResult,
    layout::Rect,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Translate then scale, as written in a group's `transform` attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupTransform {
    pub tx: f64,
    pub ty: f64,
    pub sx: f64,
    pub sy: f64,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }
}

impl GroupTransform {
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::default()
        }
    }

    fn attr(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if self.tx != 0.0 || self.ty != 0.0 {
            parts.push(format!("translate({} {})", fmt(self.tx), fmt(self.ty)));
        }
        if self.sx != 1.0 || self.sy != 1.0 {
            parts.push(format!("scale({}, {})", fmt(self.sx), fmt(self.sy)));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!(r#"transform="{}""#, parts.join(" ")))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SvgNode {
    /// Document root with explicit pixel size.
    Root {
        width: f64,
        height: f64,
        children: Vec<SvgNode>,
    },
    Group {
        transform: GroupTransform,
        children: Vec<SvgNode>,
    },
    Rect {
        rect: Rect,
        stroke: Option<String>,
        fill: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
    /// Bitmap looked up in the photo store by `source`.
    Image {
        rect: Rect,
        source: String,
        /// Id of a clip path elsewhere in the document. Not checked.
        clip_path: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    ClipPath {
        id: String,
        child: Box<SvgNode>,
    },
}

impl SvgNode {
    pub fn root(width: f64, height: f64, children: Vec<SvgNode>) -> Self {
        Self::Root {
            width,
            height,
            children,
        }
    }

    pub fn group(transform: GroupTransform, children: Vec<SvgNode>) -> Self {
        Self::Group {
            transform,
            children,
        }
    }

    pub fn filled_rect(rect: Rect, fill: impl Into<String>) -> Self {
        Self::Rect {
            rect,
            stroke: None,
            fill: Some(fill.into()),
        }
    }

    pub fn stroked_rect(rect: Rect, stroke: impl Into<String>) -> Self {
        Self::Rect {
            rect,
            stroke: Some(stroke.into()),
            fill: None,
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::Text {
            x,
            y,
            text: text.into(),
        }
    }

    pub fn image(rect: Rect, source: impl Into<String>, clip_path: Option<String>) -> Self {
        Self::Image {
            rect,
            source: source.into(),
            clip_path,
        }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::Circle { cx, cy, r }
    }

    pub fn clip_path(id: impl Into<String>, child: SvgNode) -> Self {
        Self::ClipPath {
            id: id.into(),
            child: Box::new(child),
        }
    }

    pub fn children(&self) -> &[SvgNode] {
        match self {
            Self::Root { children, .. } | Self::Group { children, .. } => children,
            Self::ClipPath { child, .. } => std::slice::from_ref(&**child),
            _ => &[],
        }
    }

    pub fn write_to(&self, out: &mut String, photos: &PhotoStore) -> GridResult<()> {
        match self {
            Self::Root {
                width,
                height,
                children,
            } => {
                let _ = writeln!(
                    out,
                    r#"<svg xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}" width="{}" height="{}">"#,
                    fmt(*width),
                    fmt(*height)
                );
                for child in children {
                    child.write_to(out, photos)?;
                }
                out.push_str("</svg>\n");
            }
            Self::Group {
                transform,
                children,
            } => {
                match transform.attr() {
                    Some(attr) => {
                        let _ = writeln!(out, "<g {attr}>");
                    }
                    None => out.push_str("<g>\n"),
                }
                for child in children {
                    child.write_to(out, photos)?;
                }
                out.push_str("</g>\n");
            }
            Self::Rect { rect, stroke, fill } => {
                let _ = writeln!(
                    out,
                    r#"<rect fill="{}" stroke="{}" stroke-width="1" x="{}" y="{}" width="{}" height="{}"/>"#,
                    escape_attr(fill.as_deref().unwrap_or("none")),
                    escape_attr(stroke.as_deref().unwrap_or("none")),
                    fmt(rect.x),
                    fmt(rect.y),
                    fmt(rect.w),
                    fmt(rect.h)
                );
            }
            Self::Text { x, y, text } => {
                let _ = writeln!(
                    out,
                    r#"<text x="{}" y="{}">{}</text>"#,
                    fmt(*x),
                    fmt(*y),
                    escape_xml(text)
                );
            }
            Self::Image {
                rect,
                source,
                clip_path,
            } => {
                let image = photos.get(source)?;
                let clip = clip_path
                    .as_deref()
                    .map(|id| format!(r#" clip-path="url(#{})""#, escape_attr(id)))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    r#"<image x="{}" y="{}" width="{}" height="{}"{clip} xlink:href="{}"/>"#,
                    fmt(rect.x),
                    fmt(rect.y),
                    fmt(rect.w),
                    fmt(rect.h),
                    image.data_uri()
                );
            }
            Self::Circle { cx, cy, r } => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                    fmt(*cx),
                    fmt(*cy),
                    fmt(*r)
                );
            }
            Self::ClipPath { id, child } => {
                let _ = writeln!(out, r#"<clipPath id="{}">"#, escape_attr(id));
                child.write_to(out, photos)?;
                out.push_str("</clipPath>\n");
            }
        }
        Ok(())
    }
}

/// Serialize a whole tree. Fails only when an image is missing from `photos`.
pub fn render_svg(root: &SvgNode, photos: &PhotoStore) -> GridResult<String> {
    let mut out = String::new();
    root.write_to(&mut out, photos)?;
    Ok(out)
}

fn fmt(v: f64) -> String {
    // Shortest round-trippable decimal, without `-0` or float noise from layout math.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

//! SVG output surface

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use windot_core::DevicePoint;

use crate::error::RenderResult;
use crate::surface::{normalized_box, Anchor, CanvasWriter, Color, DrawingSurface, Font, OvalStyle};

/// Collects SVG elements in draw order
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    elements: Vec<String>,
    comments: Vec<String>,
    width: u32,
    height: u32,
    background: Option<Color>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment emitted right after the opening `<svg>` tag
    pub fn add_comment(&mut self, text: &str) {
        self.comments.push(text.replace("--", "- -"));
    }

    /// Whole document as a string
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height, self.width, self.height
        ));
        out.push('\n');
        for comment in &self.comments {
            for line in comment.lines() {
                out.push_str(&format!("  <!-- {} -->\n", line));
            }
        }
        if let Some(background) = self.background {
            out.push_str(&format!(
                "  <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
                self.width,
                self.height,
                background.to_hex()
            ));
        }
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawingSurface for SvgSurface {
    fn begin(&mut self, width: u32, height: u32, background: Color) {
        self.width = width;
        self.height = height;
        self.background = Some(background);
        self.elements.clear();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn line(&mut self, from: DevicePoint, to: DevicePoint, width: i64, color: Color) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="square"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex(),
            width.max(1)
        ));
    }

    fn oval(&mut self, corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        // a degenerate box still leaves a mark
        let rx = ((x1 - x0) as f64 / 2.0).max(0.5);
        let ry = ((y1 - y0) as f64 / 2.0).max(0.5);
        self.elements.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            cx,
            cy,
            rx,
            ry,
            style.fill.to_hex(),
            style.outline.to_hex(),
            style.width.max(1)
        ));
    }

    fn rectangle(&mut self, corner1: DevicePoint, corner2: DevicePoint, fill: Color) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x0,
            y0,
            x1 - x0,
            y1 - y0,
            fill.to_hex()
        ));
    }

    fn text(&mut self, at: DevicePoint, text: &str, font: &Font, anchor: Anchor, color: Color) {
        let text_anchor = match anchor.horizontal() {
            h if h == 0.0 => "start",
            h if h == 1.0 => "end",
            _ => "middle",
        };
        let baseline = match anchor.vertical() {
            v if v == 0.0 => "hanging",
            v if v == 1.0 => "text-after-edge",
            _ => "central",
        };
        let weight = if font.bold { r#" font-weight="bold""# } else { "" };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px"{} text-anchor="{}" dominant-baseline="{}" fill="{}">{}</text>"#,
            at.x,
            at.y,
            escape_xml(&font.css_family()),
            font.size,
            weight,
            text_anchor,
            baseline,
            color.to_hex(),
            escape_xml(text)
        ));
    }
}

impl CanvasWriter for SvgSurface {
    fn write_to_file(&self, path: &Path) -> RenderResult<()> {
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(self.to_svg_string().as_bytes())?;
        file.flush()?;
        Ok(())
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
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_frame() {
        let mut svg = SvgSurface::new();
        svg.begin(40, 30, Color::WHITE);
        let doc = svg.to_svg_string();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains(r#"viewBox="0 0 40 30""#));
        assert!(doc.contains(r##"<rect width="40" height="30" fill="#ffffff"/>"##));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_degenerate_oval_is_visible() {
        let mut svg = SvgSurface::new();
        svg.begin(10, 10, Color::WHITE);
        let style = OvalStyle { width: 1, fill: Color::BLACK, outline: Color::BLACK };
        svg.oval(DevicePoint::new(4, 6), DevicePoint::new(4, 4), style);
        let doc = svg.to_svg_string();
        assert!(doc.contains(r#"cx="4" cy="5" rx="0.5" ry="1""#));
    }

    #[test]
    fn test_text_is_escaped_and_anchored() {
        let mut svg = SvgSurface::new();
        svg.begin(100, 40, Color::WHITE);
        let font = Font::new(&["Helvetica Narrow", "sans-serif"], 12, false);
        svg.text(DevicePoint::new(10, 6), "a<b & \"c\"", &font, Anchor::NW, Color::BLACK);
        let doc = svg.to_svg_string();
        assert!(doc.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(doc.contains(r#"text-anchor="start" dominant-baseline="hanging""#));
        assert!(doc.contains("font-family=\"&apos;Helvetica Narrow&apos;, sans-serif\""));
    }

    #[test]
    fn test_comments_cannot_close_early() {
        let mut svg = SvgSurface::new();
        svg.begin(1, 1, Color::WHITE);
        svg.add_comment("window=11 -- threshold=7");
        assert!(svg.to_svg_string().contains("<!-- window=11 - - threshold=7 -->"));
    }
}

//! Encapsulated PostScript output in gray colour mode
//!
//! The page is `page_scale` times the canvas size in points. Device y grows
//! downwards, PostScript y grows upwards, so every y is written as
//! `height - y`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use windot_core::{DevicePoint, PlotError, PlotResult};

use crate::error::RenderResult;
use crate::surface::{normalized_box, Anchor, CanvasWriter, Color, DrawingSurface, Font, OvalStyle};

const ELLIPSE_PROLOG: &str = "/ellipsedict 8 dict def
ellipsedict /mtrx matrix put
/ellipse {
  ellipsedict begin
  /ry exch def /rx exch def /y exch def /x exch def
  /savematrix mtrx currentmatrix def
  x y translate rx ry scale
  0 0 1 0 360 arc
  savematrix setmatrix
  end
} def";

/// Fraction of the font size above the baseline
const ASCENT: f64 = 0.75;

#[derive(Debug, Clone)]
pub struct PostScriptSurface {
    body: Vec<String>,
    width: u32,
    height: u32,
    page_scale: f64,
    title: Option<String>,
    creation_date: Option<String>,
}

impl PostScriptSurface {
    pub fn new(page_scale: f64) -> PlotResult<Self> {
        if !page_scale.is_finite() || page_scale <= 0.0 {
            return Err(PlotError::invalid_parameter(
                "ps_scale",
                page_scale,
                "must be a finite number greater than 0",
            ));
        }
        Ok(Self {
            body: Vec::new(),
            width: 0,
            height: 0,
            page_scale,
            title: None,
            creation_date: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Stamp `%%CreationDate` with the current local time
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.creation_date = enabled.then(|| chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string());
        self
    }

    pub fn page_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.page_scale).ceil() as u32,
            (self.height as f64 * self.page_scale).ceil() as u32,
        )
    }

    fn flip(&self, y: f64) -> f64 {
        self.height as f64 - y
    }

    pub fn to_postscript_string(&self) -> String {
        let (page_w, page_h) = self.page_size();
        let mut out = String::new();
        out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
        out.push_str(&format!("%%Creator: windot {}\n", env!("CARGO_PKG_VERSION")));
        if let Some(title) = &self.title {
            out.push_str(&format!("%%Title: {}\n", title.replace(['\n', '\r'], " ")));
        }
        if let Some(date) = &self.creation_date {
            out.push_str(&format!("%%CreationDate: {}\n", date));
        }
        out.push_str(&format!("%%BoundingBox: 0 0 {} {}\n", page_w, page_h));
        out.push_str("%%Pages: 1\n");
        out.push_str("%%EndComments\n");
        out.push_str(ELLIPSE_PROLOG);
        out.push('\n');
        out.push_str("%%Page: 1 1\n");
        out.push_str("gsave\n");
        out.push_str(&format!("{} {} scale\n", self.page_scale, self.page_scale));
        for command in &self.body {
            out.push_str(command);
            out.push('\n');
        }
        out.push_str("grestore\n");
        out.push_str("showpage\n");
        out.push_str("%%EOF\n");
        out
    }
}

fn gray(color: Color) -> String {
    format!("{:.3} setgray", color.gray_level())
}

/// Standard PostScript font for the first family that has one
fn postscript_font(font: &Font) -> String {
    let base = font
        .families
        .iter()
        .find_map(|family| match family.to_ascii_lowercase().as_str() {
            "helvetica narrow" => Some("Helvetica-Narrow"),
            "helvetica" | "arial" | "sans-serif" => Some("Helvetica"),
            "times" | "times new roman" | "serif" => Some("Times"),
            "courier" | "monospace" => Some("Courier"),
            _ => None,
        })
        .unwrap_or("Helvetica");

    match (base, font.bold) {
        ("Times", true) => "Times-Bold".to_string(),
        ("Times", false) => "Times-Roman".to_string(),
        (base, true) => format!("{}-Bold", base),
        (base, false) => base.to_string(),
    }
}

fn escape_ps(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out
}

impl DrawingSurface for PostScriptSurface {
    fn begin(&mut self, width: u32, height: u32, background: Color) {
        self.width = width;
        self.height = height;
        self.body.clear();
        self.body.push(format!("{} 0 0 {} {} rectfill", gray(background), width, height));
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn line(&mut self, from: DevicePoint, to: DevicePoint, width: i64, color: Color) {
        self.body.push(format!(
            "{} {} setlinewidth 2 setlinecap newpath {} {} moveto {} {} lineto stroke",
            gray(color),
            width.max(1),
            from.x,
            self.flip(from.y as f64),
            to.x,
            self.flip(to.y as f64)
        ));
    }

    fn oval(&mut self, corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = self.flip((y0 + y1) as f64 / 2.0);
        let rx = ((x1 - x0) as f64 / 2.0).max(0.5);
        let ry = ((y1 - y0) as f64 / 2.0).max(0.5);
        self.body.push(format!(
            "newpath {} {} {} {} ellipse closepath gsave {} fill grestore {} {} setlinewidth stroke",
            cx,
            cy,
            rx,
            ry,
            gray(style.fill),
            gray(style.outline),
            style.width.max(1)
        ));
    }

    fn rectangle(&mut self, corner1: DevicePoint, corner2: DevicePoint, fill: Color) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        self.body.push(format!(
            "{} {} {} {} {} rectfill",
            gray(fill),
            x0,
            self.flip(y1 as f64),
            x1 - x0,
            y1 - y0
        ));
    }

    fn text(&mut self, at: DevicePoint, text: &str, font: &Font, anchor: Anchor, color: Color) {
        let size = font.size as f64;
        let baseline = self.flip(at.y as f64) - ASCENT * size * (1.0 - anchor.vertical());
        self.body.push(format!(
            "/{} findfont {} scalefont setfont {} ({}) dup stringwidth pop {} mul neg {} add {} moveto show",
            postscript_font(font),
            font.size,
            gray(color),
            escape_ps(text),
            anchor.horizontal(),
            at.x,
            baseline
        ));
    }
}

impl CanvasWriter for PostScriptSurface {
    fn write_to_file(&self, path: &Path) -> RenderResult<()> {
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(self.to_postscript_string().as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_page_scale() {
        assert!(PostScriptSurface::new(0.0).is_err());
        assert!(PostScriptSurface::new(f64::NAN).is_err());
    }

    #[test]
    fn test_bounding_box_uses_page_scale() {
        let mut ps = PostScriptSurface::new(0.5).unwrap();
        ps.begin(100, 51, Color::WHITE);
        let doc = ps.to_postscript_string();
        assert!(doc.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(doc.contains("%%BoundingBox: 0 0 50 26\n"));
        assert!(doc.contains("0.5 0.5 scale\n"));
        assert!(!doc.contains("%%CreationDate"));
        assert!(doc.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_y_is_flipped() {
        let mut ps = PostScriptSurface::new(1.0).unwrap();
        ps.begin(50, 40, Color::WHITE);
        ps.line(DevicePoint::new(0, 0), DevicePoint::new(10, 30), 2, Color::BLACK);
        let doc = ps.to_postscript_string();
        assert!(doc.contains("0.000 setgray 2 setlinewidth 2 setlinecap newpath 0 40 moveto 10 10 lineto stroke"));
    }

    #[test]
    fn test_red_renders_as_gray() {
        let mut ps = PostScriptSurface::new(1.0).unwrap();
        ps.begin(10, 10, Color::WHITE);
        let style = OvalStyle { width: 1, fill: Color::RED, outline: Color::RED };
        ps.oval(DevicePoint::new(2, 2), DevicePoint::new(4, 4), style);
        let doc = ps.to_postscript_string();
        assert!(doc.contains("newpath 3 7 1 1 ellipse"));
        assert!(doc.contains("0.299 setgray fill"));
        assert!(!doc.contains("setrgbcolor"));
    }

    #[test]
    fn test_text_escaping_and_font() {
        let mut ps = PostScriptSurface::new(1.0).unwrap();
        ps.begin(100, 40, Color::WHITE);
        let font = Font::new(&["Helvetica Narrow", "Futura"], 12, false);
        ps.text(DevicePoint::new(10, 6), "seq(1)\\", &font, Anchor::NW, Color::BLACK);
        let doc = ps.to_postscript_string();
        assert!(doc.contains("/Helvetica-Narrow findfont 12 scalefont setfont"));
        assert!(doc.contains("(seq\\(1\\)\\\\)"));
        assert!(doc.contains("0 mul neg 10 add 25 moveto show"));
    }

    #[test]
    fn test_font_mapping() {
        assert_eq!(postscript_font(&Font::new(&["Futura", "Arial"], 12, true)), "Helvetica-Bold");
        assert_eq!(postscript_font(&Font::new(&["Times"], 12, false)), "Times-Roman");
        assert_eq!(postscript_font(&Font::new(&["Unknown"], 12, false)), "Helvetica");
    }

    #[test]
    fn test_timestamp_header() {
        let mut ps = PostScriptSurface::new(1.0).unwrap().with_timestamp(true).with_title("dot plot");
        ps.begin(1, 1, Color::WHITE);
        let doc = ps.to_postscript_string();
        assert!(doc.contains("%%CreationDate: "));
        assert!(doc.contains("%%Title: dot plot\n"));
    }
}

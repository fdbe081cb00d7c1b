//! File export: pick a surface from the output extension, draw, persist

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::layout::{Plot, PlotContent};
use crate::postscript::PostScriptSurface;
#[cfg(feature = "raster")]
use crate::raster::RasterSurface;
use crate::surface::CanvasWriter;
use crate::svg::SvgSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Svg,
    Png,
    PostScript,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "ps" | "eps" => Ok(OutputFormat::PostScript),
            "" => Err(RenderError::UnsupportedFormat(format!(
                "{} has no extension (expected .svg, .png, .ps or .eps)",
                path.display()
            ))),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Svg => write!(f, "SVG"),
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::PostScript => write!(f, "PostScript"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// PostScript page size relative to the canvas
    pub ps_scale: f64,
    /// Stamp PostScript output with its creation time
    pub timestamp: bool,
    /// Document title for formats that carry one
    pub title: Option<String>,
    /// Provenance note for formats that carry comments
    pub comment: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            ps_scale: 0.6,
            timestamp: false,
            title: None,
            comment: None,
        }
    }
}

/// Draw `plot` into the surface matching the extension of `path` and write it
pub fn render_to_file<C: PlotContent>(
    plot: &Plot<C>,
    path: &Path,
    options: &ExportOptions,
) -> RenderResult<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    log::debug!("Rendering {} output to {}", format, path.display());

    match format {
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new();
            plot.execute(&mut surface)?;
            if let Some(title) = &options.title {
                surface.add_comment(title);
            }
            if let Some(comment) = &options.comment {
                surface.add_comment(comment);
            }
            surface.write_to_file(path)?;
        }
        #[cfg(feature = "raster")]
        OutputFormat::Png => {
            let mut surface = RasterSurface::new();
            plot.execute(&mut surface)?;
            surface.write_to_file(path)?;
        }
        #[cfg(not(feature = "raster"))]
        OutputFormat::Png => {
            return Err(RenderError::UnsupportedFormat(
                "png (built without the raster feature)".to_string(),
            ));
        }
        OutputFormat::PostScript => {
            let mut surface = PostScriptSurface::new(options.ps_scale)?.with_timestamp(options.timestamp);
            if let Some(title) = &options.title {
                surface = surface.with_title(title.clone());
            }
            plot.execute(&mut surface)?;
            surface.write_to_file(path)?;
        }
    }

    log::info!("wrote {}", path.display());
    Ok(format)
}

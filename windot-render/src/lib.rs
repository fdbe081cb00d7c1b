/*!
# WinDot Rendering

Layout engine and output surfaces for sequence dot plots.

## Architecture

1. **Layout**: a [`Plot`] lays out any [`PlotContent`] once, then draws axes,
   tics, titles and content through a [`Painter`]
2. **Content**: [`DotPlot`] places one marker per detected match
3. **Surfaces**: SVG, PNG and gray-mode PostScript writers, plus an in-memory
   recorder used by tests
*/

pub mod error;
pub mod surface;
pub mod svg;
#[cfg(feature = "raster")]
pub mod raster;
pub mod postscript;
pub mod layout;
pub mod dotplot;
pub mod export;

pub use error::{RenderError, RenderResult};
pub use surface::{Anchor, CanvasWriter, Color, DrawCommand, DrawingSurface, Font, OvalStyle, RecordingSurface};
pub use svg::SvgSurface;
#[cfg(feature = "raster")]
pub use raster::RasterSurface;
pub use postscript::PostScriptSurface;
pub use layout::{AxisStyle, ClosurePlot, Painter, Plot, PlotContent, PlotId, PlotSet};
pub use dotplot::{DotPlot, DotPlotOptions};
pub use export::{render_to_file, ExportOptions, OutputFormat};

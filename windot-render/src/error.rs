use thiserror::Error;
use windot_core::PlotError;

/// Errors raised while laying out, drawing or writing a plot
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "raster")]
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

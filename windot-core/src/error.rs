//! Error types shared by the WinDot core components

use thiserror::Error;

/// Errors raised while detecting matches, laying out a plot or scanning gaps
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Invalid plot geometry: {0}")]
    InvalidGeometry(String),

    #[error("Required plot capability not supplied: {0}")]
    NotImplemented(&'static str),

    #[error("Alignment provider failed: {0}")]
    Alignment(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PlotError {
    pub fn invalid_parameter<V: ToString>(name: &'static str, value: V, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub fn invalid_geometry<S: Into<String>>(message: S) -> Self {
        Self::InvalidGeometry(message.into())
    }
}

pub type PlotResult<T> = Result<T, PlotError>;

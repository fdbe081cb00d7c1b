//! Plot geometry engine
//!
//! Converts the content dimensions and margins a plot supplies into canvas
//! size, origin offset and the logical-to-device transform. Logical y grows
//! upward from the bottom of the content area; device y grows downward, so
//! the transform flips the vertical axis. Nothing here touches a surface.

use crate::error::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// Content size and the four margins around it, in content units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotDimensions {
    pub width: i64,
    pub height: i64,
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl PlotDimensions {
    pub fn new(width: i64, height: i64, left: i64, right: i64, top: i64, bottom: i64) -> Self {
        Self { width, height, left, right, top, bottom }
    }

    pub fn as_array(&self) -> [i64; 6] {
        [self.width, self.height, self.left, self.right, self.top, self.bottom]
    }

    pub fn validate(&self) -> PlotResult<()> {
        const NAMES: [&str; 6] = ["width", "height", "left", "right", "top", "bottom"];
        for (name, value) in NAMES.iter().zip(self.as_array()) {
            if value < 0 {
                return Err(PlotError::invalid_geometry(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<&[f64]> for PlotDimensions {
    type Error = PlotError;

    /// Accepts exactly six finite, non-negative values
    fn try_from(values: &[f64]) -> PlotResult<Self> {
        if values.len() != 6 {
            return Err(PlotError::invalid_geometry(format!(
                "expected six dimension values (width, height, left, right, top, bottom), got {}",
                values.len()
            )));
        }
        let mut out = [0i64; 6];
        for (slot, &value) in out.iter_mut().zip(values) {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::invalid_geometry(format!(
                    "dimension values must be finite and non-negative, got {}",
                    value
                )));
            }
            *slot = round_half_even(value);
        }
        Ok(Self::new(out[0], out[1], out[2], out[3], out[4], out[5]))
    }
}

/// Line thickness of each axis, zero when the axis is not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisWidths {
    pub x: i64,
    pub y: i64,
}

impl AxisWidths {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn none() -> Self {
        Self { x: 0, y: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: i64,
    pub y: i64,
}

impl DevicePoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Read-only layout computed once per plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotGeometry {
    pub dimensions: PlotDimensions,
    pub axes: AxisWidths,
    pub scale: f64,
    pub canvas_width: i64,
    pub canvas_height: i64,
    pub origin_x: i64,
    pub origin_y: i64,
}

impl PlotGeometry {
    pub fn new(dimensions: PlotDimensions, axes: AxisWidths, scale: f64) -> PlotResult<Self> {
        validate_scale(scale)?;
        dimensions.validate()?;
        if axes.x < 0 || axes.y < 0 {
            return Err(PlotError::invalid_geometry(format!(
                "axis widths must be non-negative, got x={} y={}",
                axes.x, axes.y
            )));
        }

        let d = dimensions;
        let geometry = Self {
            dimensions,
            axes,
            scale,
            canvas_width: d.left + axes.y + d.width + d.right,
            canvas_height: d.top + d.height + axes.x + d.bottom,
            origin_x: d.left + axes.y,
            origin_y: d.top + d.height,
        };
        log::debug!(
            "Plot geometry: canvas {}x{}, origin ({}, {}), scale {}",
            geometry.canvas_width,
            geometry.canvas_height,
            geometry.origin_x,
            geometry.origin_y,
            scale
        );
        Ok(geometry)
    }

    pub fn content_width(&self) -> i64 {
        self.dimensions.width
    }

    pub fn content_height(&self) -> i64 {
        self.dimensions.height
    }

    /// Logical point to device point, scaled
    pub fn to_device(&self, x: f64, y: f64) -> DevicePoint {
        DevicePoint {
            x: self.origin_x + round_half_even(x * self.scale),
            y: self.origin_y - round_half_even(y * self.scale),
        }
    }

    /// Logical point to device point without scaling; the origin offset still applies
    pub fn to_device_unscaled(&self, x: f64, y: f64) -> DevicePoint {
        DevicePoint {
            x: self.origin_x + round_half_even(x),
            y: self.origin_y - round_half_even(y),
        }
    }

    /// Device thickness of a logical line width
    pub fn scale_width(&self, width: f64) -> i64 {
        round_half_even(width * self.scale)
    }
}

pub fn validate_scale(scale: f64) -> PlotResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PlotError::invalid_parameter("scale", scale, "must be a finite number greater than 0"));
    }
    Ok(())
}

/// Round to nearest, ties to even
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlotGeometry {
        PlotGeometry::new(PlotDimensions::new(100, 50, 10, 5, 8, 12), AxisWidths::new(2, 2), 1.0).unwrap()
    }

    #[test]
    fn test_layout_formulas() {
        let g = sample();
        assert_eq!(g.canvas_width, 10 + 2 + 100 + 5);
        assert_eq!(g.canvas_width, 117);
        assert_eq!(g.canvas_height, 8 + 50 + 2 + 12);
        assert_eq!(g.origin_x, 12);
        assert_eq!(g.origin_y, 58);
    }

    #[test]
    fn test_transform_flips_y() {
        let g = sample();
        assert_eq!(g.to_device(0.0, 0.0), DevicePoint::new(12, 58));
        assert_eq!(g.to_device(10.0, 20.0), DevicePoint::new(22, 38));
        // larger logical y is higher on the canvas
        assert!(g.to_device(0.0, 30.0).y < g.to_device(0.0, 10.0).y);
    }

    #[test]
    fn test_scaled_and_unscaled_transform() {
        let g = PlotGeometry::new(PlotDimensions::new(200, 100, 0, 0, 0, 0), AxisWidths::none(), 2.0).unwrap();
        assert_eq!(g.to_device(10.0, 10.0), DevicePoint::new(20, 80));
        assert_eq!(g.to_device_unscaled(10.0, 10.0), DevicePoint::new(10, 90));
        assert_eq!(g.scale_width(3.0), 6);
    }

    #[test]
    fn test_rounding_ties_to_even() {
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(-1.5), -2);
        assert_eq!(round_half_even(2.6), 3);
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let err = PlotGeometry::new(PlotDimensions::new(10, -1, 0, 0, 0, 0), AxisWidths::none(), 1.0).unwrap_err();
        assert!(matches!(err, PlotError::InvalidGeometry(_)));
    }

    #[test]
    fn test_rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = PlotGeometry::new(PlotDimensions::new(1, 1, 0, 0, 0, 0), AxisWidths::none(), scale).unwrap_err();
            assert!(matches!(err, PlotError::InvalidParameter { name: "scale", .. }));
        }
    }

    #[test]
    fn test_dimensions_from_slice() {
        let dims = PlotDimensions::try_from(&[100.0, 50.0, 10.0, 5.0, 8.0, 12.0][..]).unwrap();
        assert_eq!(dims, PlotDimensions::new(100, 50, 10, 5, 8, 12));

        let short = PlotDimensions::try_from(&[1.0, 2.0, 3.0][..]);
        assert!(matches!(short, Err(PlotError::InvalidGeometry(_))));

        let negative = PlotDimensions::try_from(&[1.0, 2.0, 3.0, 4.0, -5.0, 6.0][..]);
        assert!(matches!(negative, Err(PlotError::InvalidGeometry(_))));

        let nan = PlotDimensions::try_from(&[1.0, 2.0, 3.0, 4.0, f64::NAN, 6.0][..]);
        assert!(matches!(nan, Err(PlotError::InvalidGeometry(_))));
    }
}

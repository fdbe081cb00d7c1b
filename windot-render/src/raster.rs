//! PNG output surface
//!
//! Lines use a square brush along a Bresenham walk, ovals are filled by
//! testing pixel centres against the inscribed ellipse. Text is not
//! rasterised.

use std::path::Path;

use image::{Rgba, RgbaImage};
use windot_core::DevicePoint;

use crate::error::RenderResult;
use crate::surface::{normalized_box, Anchor, CanvasWriter, Color, DrawingSurface, Font, OvalStyle};

pub struct RasterSurface {
    image: RgbaImage,
    skipped_text: usize,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterSurface {
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            skipped_text: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Number of text items dropped so far
    pub fn skipped_text(&self) -> usize {
        self.skipped_text
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, rgba(color));
        }
    }

    fn stamp(&mut self, x: i64, y: i64, width: i64, color: Color) {
        let lo = -(width - 1) / 2;
        let hi = lo + width - 1;
        for dy in lo..=hi {
            for dx in lo..=hi {
                self.put(x + dx, y + dy, color);
            }
        }
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

impl DrawingSurface for RasterSurface {
    fn begin(&mut self, width: u32, height: u32, background: Color) {
        self.image = RgbaImage::from_pixel(width, height, rgba(background));
        self.skipped_text = 0;
    }

    fn size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    fn line(&mut self, from: DevicePoint, to: DevicePoint, width: i64, color: Color) {
        let width = width.max(1);
        let (mut x0, mut y0) = (from.x, from.y);
        let (x1, y1) = (to.x, to.y);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, width, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn oval(&mut self, corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        let rx = (x1 - x0) as f64 / 2.0 + 0.5;
        let ry = (y1 - y0) as f64 / 2.0 + 0.5;
        let ring = style.width.max(1) as f64;
        let (inner_rx, inner_ry) = (rx - ring, ry - ring);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let (px, py) = (x as f64 - cx, y as f64 - cy);
                if (px / rx).powi(2) + (py / ry).powi(2) > 1.0 {
                    continue;
                }
                let interior = inner_rx > 0.0
                    && inner_ry > 0.0
                    && (px / inner_rx).powi(2) + (py / inner_ry).powi(2) <= 1.0;
                self.put(x, y, if interior { style.fill } else { style.outline });
            }
        }
    }

    fn rectangle(&mut self, corner1: DevicePoint, corner2: DevicePoint, fill: Color) {
        let (x0, y0, x1, y1) = normalized_box(corner1, corner2);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, fill);
            }
        }
    }

    fn text(&mut self, at: DevicePoint, text: &str, _font: &Font, _anchor: Anchor, _color: Color) {
        self.skipped_text += 1;
        log::debug!("PNG output does not rasterise text; dropped {:?} at ({}, {})", text, at.x, at.y);
    }
}

impl CanvasWriter for RasterSurface {
    fn write_to_file(&self, path: &Path) -> RenderResult<()> {
        if self.skipped_text > 0 {
            log::info!("{} text items are not present in {}", self.skipped_text, path.display());
        }
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &RasterSurface, x: u32, y: u32) -> [u8; 4] {
        surface.image().get_pixel(x, y).0
    }

    #[test]
    fn test_background_fill() {
        let mut surface = RasterSurface::new();
        surface.begin(8, 4, Color::rgb(10, 20, 30));
        assert_eq!(surface.size(), (8, 4));
        assert_eq!(pixel(&surface, 7, 3), [10, 20, 30, 255]);
    }

    #[test]
    fn test_thick_horizontal_line() {
        let mut surface = RasterSurface::new();
        surface.begin(20, 10, Color::WHITE);
        surface.line(DevicePoint::new(2, 5), DevicePoint::new(12, 5), 3, Color::BLACK);
        for y in 4..=6 {
            assert_eq!(pixel(&surface, 7, y), [0, 0, 0, 255]);
        }
        assert_eq!(pixel(&surface, 7, 3), [255, 255, 255, 255]);
        assert_eq!(pixel(&surface, 7, 7), [255, 255, 255, 255]);
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut surface = RasterSurface::new();
        surface.begin(4, 4, Color::WHITE);
        surface.line(DevicePoint::new(-10, -10), DevicePoint::new(10, 10), 1, Color::BLACK);
        assert_eq!(pixel(&surface, 2, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn test_degenerate_oval_marks_pixels() {
        let mut surface = RasterSurface::new();
        surface.begin(10, 10, Color::WHITE);
        let style = OvalStyle { width: 1, fill: Color::RED, outline: Color::RED };
        surface.oval(DevicePoint::new(4, 6), DevicePoint::new(4, 4), style);
        for y in 4..=6 {
            assert_eq!(pixel(&surface, 4, y), [255, 0, 0, 255]);
        }
        assert_eq!(pixel(&surface, 5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_large_oval_has_outline_and_fill() {
        let mut surface = RasterSurface::new();
        surface.begin(20, 20, Color::WHITE);
        let style = OvalStyle { width: 1, fill: Color::RED, outline: Color::BLACK };
        surface.oval(DevicePoint::new(2, 2), DevicePoint::new(16, 16), style);
        assert_eq!(pixel(&surface, 9, 9), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 9, 2), [0, 0, 0, 255]);
        assert_eq!(pixel(&surface, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_is_counted_not_drawn() {
        let mut surface = RasterSurface::new();
        surface.begin(10, 10, Color::WHITE);
        surface.text(DevicePoint::new(1, 1), "seq", &Font::new(&["Arial"], 12, false), Anchor::NW, Color::BLACK);
        assert_eq!(surface.skipped_text(), 1);
        assert_eq!(pixel(&surface, 1, 1), [255, 255, 255, 255]);
    }
}

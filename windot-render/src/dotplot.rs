//! Sequence dot plot content
//!
//! Markers are placed so that a larger row index sits lower on the canvas.
//! Each point's [`MatchKind`] picks its marker style.

use serde::{Deserialize, Serialize};
use windot_core::geometry::round_half_even;
use windot_core::{DotParams, MatchDetector, MatchKind, MatchSet, PlotDimensions, PlotError, PlotResult};

use crate::layout::{AxisStyle, Painter, PlotContent};
use crate::surface::{Anchor, Color, Font};

pub const SANS_FACES: &[&str] = &["Helvetica Narrow", "Futura", "Helvetica", "Arial", "sans-serif"];
pub const TITLE_FONT_SIZE: u32 = 12;
pub const TOP_TITLE_MARGIN: i64 = 6;
pub const NAME_HEIGHT: i64 = 22;
pub const AXIS_WIDTH: i64 = 3;
pub const TIC_LENGTH: i64 = 12;
pub const TIC_WIDTH: i64 = 3;
pub const TIC_SPACING: i64 = 100;
const BARE_LABEL_SPACE: i64 = 4;
const LEFT_TITLE_MARGIN: i64 = 10;
const RIGHT_PAD: i64 = 12;
const TITLE_LINE_GAP: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotOptions {
    pub params: DotParams,
    pub with_axes: bool,
    pub dot_size: i64,
    pub seqname1: Option<String>,
    pub seqname2: Option<String>,
    pub primary_color: Color,
    pub secondary_color: Color,
    pub background: Color,
}

impl Default for DotPlotOptions {
    fn default() -> Self {
        Self {
            params: DotParams::default(),
            with_axes: true,
            dot_size: 1,
            seqname1: None,
            seqname2: None,
            primary_color: Color::BLACK,
            secondary_color: Color::RED,
            background: Color::WHITE,
        }
    }
}

impl DotPlotOptions {
    pub fn validate(&self) -> PlotResult<()> {
        self.params.validate()?;
        if self.dot_size < 1 {
            return Err(PlotError::invalid_parameter("dot_size", self.dot_size, "must be at least 1"));
        }
        Ok(())
    }

    pub fn with_names(mut self, seqname1: Option<String>, seqname2: Option<String>) -> Self {
        self.seqname1 = seqname1;
        self.seqname2 = seqname2;
        self
    }
}

#[derive(Debug, Clone)]
pub struct DotPlot {
    options: DotPlotOptions,
    matches: MatchSet,
}

impl DotPlot {
    /// Detect matches between two sequences and wrap them as plot content
    pub fn new(seq1: &[u8], seq2: &[u8], options: DotPlotOptions) -> PlotResult<Self> {
        options.validate()?;
        let matches = MatchDetector::new(options.params)?.detect(seq1, seq2);
        Ok(Self { options, matches })
    }

    pub fn from_matches(matches: MatchSet, options: DotPlotOptions) -> PlotResult<Self> {
        options.validate()?;
        if matches.params != options.params {
            return Err(PlotError::invalid_parameter(
                "params",
                format!("window={} threshold={}", matches.params.window, matches.params.threshold),
                "match set was detected with different parameters",
            ));
        }
        Ok(Self { options, matches })
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn options(&self) -> &DotPlotOptions {
        &self.options
    }

    fn names(&self) -> Vec<&str> {
        [&self.options.seqname1, &self.options.seqname2]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .filter(|n| !n.is_empty())
            .collect()
    }

    fn label_space(&self) -> i64 {
        if self.options.with_axes {
            TIC_LENGTH + 5
        } else {
            BARE_LABEL_SPACE
        }
    }

    fn left_title_margin(&self) -> i64 {
        if self.options.with_axes {
            LEFT_TITLE_MARGIN + self.label_space()
        } else {
            LEFT_TITLE_MARGIN
        }
    }

    /// Title lines with their top y in canvas coordinates
    pub fn title_lines(&self) -> Vec<(String, i64)> {
        let (name1, name2) = (
            self.options.seqname1.as_deref().unwrap_or(""),
            self.options.seqname2.as_deref().unwrap_or(""),
        );
        if !name1.is_empty() && !name2.is_empty() {
            vec![
                (format!("x = {}", name1), TOP_TITLE_MARGIN),
                (
                    format!("y = {}", name2),
                    TOP_TITLE_MARGIN + TITLE_FONT_SIZE as i64 + TITLE_LINE_GAP,
                ),
            ]
        } else {
            self.names()
                .first()
                .map(|n| vec![(n.to_string(), TOP_TITLE_MARGIN)])
                .unwrap_or_default()
        }
    }

    fn title_font() -> Font {
        Font::new(SANS_FACES, TITLE_FONT_SIZE, false)
    }
}

impl PlotContent for DotPlot {
    fn supply_dimensions(&self, scale: f64) -> PlotResult<PlotDimensions> {
        let (max_x, max_y) = self.matches.extent();
        let window = self.options.params.window;
        let label_space = self.label_space();
        Ok(PlotDimensions::new(
            round_half_even((max_x + window) as f64 * scale),
            round_half_even((max_y + window) as f64 * scale) + TIC_WIDTH,
            label_space,
            RIGHT_PAD,
            5 + NAME_HEIGHT * self.names().len() as i64,
            label_space,
        ))
    }

    fn draw_content(&self, painter: &mut Painter<'_>) -> PlotResult<()> {
        let geometry = painter.geometry();
        // content height is already scaled; flip rows in logical units
        let height = geometry.content_height() as f64 / geometry.scale;
        let window = self.options.params.window as f64;
        let dot = self.options.dot_size as f64;

        for point in &self.matches.points {
            let x = point.x as f64;
            let top = height - window - point.y as f64;
            let (fill, outline) = match point.kind {
                MatchKind::Primary => (self.options.primary_color, Color::BLACK),
                MatchKind::Secondary => (self.options.secondary_color, self.options.secondary_color),
            };
            painter.oval(x, top, x + dot - 1.0, top - dot - 1.0, 1.0, fill, outline);
        }
        log::debug!(
            "Drew {} markers ({} primary)",
            self.matches.len(),
            self.matches.primary_count
        );
        Ok(())
    }

    fn plot_name(&self) -> &str {
        "Dot Plot"
    }

    fn axis_style(&self) -> AxisStyle {
        let axis = if self.options.with_axes { AXIS_WIDTH } else { 0 };
        AxisStyle {
            x_axis_width: axis,
            y_axis_width: axis,
            x_tic_length: TIC_LENGTH,
            y_tic_length: TIC_LENGTH,
            x_tic_width: TIC_WIDTH,
            y_tic_width: TIC_WIDTH,
        }
    }

    fn tic_spacing(&self) -> Option<i64> {
        Some(TIC_SPACING)
    }

    fn draw_titles(&self, painter: &mut Painter<'_>) -> PlotResult<()> {
        let font = Self::title_font();
        let left = self.left_title_margin();
        for (title, y) in self.title_lines() {
            painter.text_unscaled(left, y, &title, &font, Anchor::NW, Color::BLACK);
        }
        Ok(())
    }

    fn background(&self) -> Color {
        self.options.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Plot;
    use crate::surface::{DrawCommand, RecordingSurface};
    use windot_core::DevicePoint;

    fn options(window: usize, threshold: usize, with_axes: bool) -> DotPlotOptions {
        DotPlotOptions {
            params: DotParams::new(window, threshold),
            with_axes,
            ..DotPlotOptions::default()
        }
    }

    #[test]
    fn test_rejects_bad_dot_size() {
        let opts = DotPlotOptions { dot_size: 0, ..options(1, 1, false) };
        assert!(matches!(
            DotPlot::new(b"AC", b"AC", opts),
            Err(PlotError::InvalidParameter { name: "dot_size", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_window() {
        assert!(matches!(
            DotPlot::new(b"AC", b"AC", options(0, 1, false)),
            Err(PlotError::InvalidParameter { name: "window", .. })
        ));
    }

    #[test]
    fn test_from_matches_requires_same_params() {
        let matches = MatchDetector::new(DotParams::new(2, 1)).unwrap().detect(b"ACGT", b"ACGA");

        let plot = DotPlot::from_matches(matches.clone(), options(2, 1, false)).unwrap();
        assert_eq!(plot.matches(), &matches);

        assert!(matches!(
            DotPlot::from_matches(matches.clone(), options(2, 2, false)),
            Err(PlotError::InvalidParameter { name: "params", .. })
        ));
        assert!(DotPlot::from_matches(matches, options(3, 1, false)).is_err());
    }

    #[test]
    fn test_dimensions_without_axes() {
        let plot = DotPlot::new(b"ACGT", b"ACGT", options(1, 1, false)).unwrap();
        let dims = plot.supply_dimensions(1.0).unwrap();
        assert_eq!(dims, PlotDimensions::new(4, 4 + TIC_WIDTH, 4, 12, 5, 4));
    }

    #[test]
    fn test_dimensions_with_axes_and_names() {
        let opts = options(2, 2, true).with_names(Some("alpha".into()), Some("beta".into()));
        let plot = DotPlot::new(b"ACGTAC", b"ACGTAC", opts).unwrap();
        let (max_x, max_y) = plot.matches().extent();
        assert_eq!((max_x, max_y), (4, 4));
        let dims = plot.supply_dimensions(2.5).unwrap();
        assert_eq!(dims.width, 15);
        assert_eq!(dims.height, 15 + 3);
        assert_eq!((dims.left, dims.right, dims.top, dims.bottom), (17, 12, 5 + 44, 17));
    }

    #[test]
    fn test_empty_match_set_uses_zero_extent() {
        let plot = DotPlot::new(b"AAAA", b"CCCC", options(2, 1, false)).unwrap();
        assert!(plot.matches().is_empty());
        let dims = plot.supply_dimensions(1.0).unwrap();
        assert_eq!((dims.width, dims.height), (2, 2 + TIC_WIDTH));
    }

    #[test]
    fn test_title_lines() {
        let both = DotPlot::new(b"A", b"A", options(1, 1, false).with_names(Some("s1".into()), Some("s2".into()))).unwrap();
        assert_eq!(both.title_lines(), vec![("x = s1".to_string(), 6), ("y = s2".to_string(), 24)]);

        let one = DotPlot::new(b"A", b"A", options(1, 1, false).with_names(None, Some("s2".into()))).unwrap();
        assert_eq!(one.title_lines(), vec![("s2".to_string(), 6)]);

        let none = DotPlot::new(b"A", b"A", options(1, 1, false).with_names(Some(String::new()), None)).unwrap();
        assert!(none.title_lines().is_empty());
    }

    #[test]
    fn test_marker_box_and_styles() {
        // row 1 of seq2 is a gap, so its match is secondary
        let plot = DotPlot::new(b"A-", b"A-", options(1, 1, false)).unwrap();
        assert_eq!(plot.matches().primary_count, 1);
        let plot = Plot::setup(plot, 1.0).unwrap();
        let g = plot.geometry().clone();
        assert_eq!(g.content_height(), 2 + TIC_WIDTH);

        let mut surface = RecordingSurface::new();
        plot.execute(&mut surface).unwrap();
        let ovals: Vec<_> = surface.ovals().cloned().collect();
        assert_eq!(ovals.len(), 2);

        let h = g.content_height();
        match &ovals[0] {
            DrawCommand::Oval { corner1, corner2, style } => {
                assert_eq!(*corner1, DevicePoint::new(g.origin_x, g.origin_y - (h - 1)));
                assert_eq!(*corner2, DevicePoint::new(g.origin_x, g.origin_y - (h - 1 - 2)));
                assert_eq!((style.fill, style.outline), (Color::BLACK, Color::BLACK));
            }
            other => panic!("expected oval, got {:?}", other),
        }
        match &ovals[1] {
            DrawCommand::Oval { corner1, style, .. } => {
                assert_eq!(*corner1, DevicePoint::new(g.origin_x + 1, g.origin_y - (h - 1 - 1)));
                assert_eq!((style.fill, style.outline), (Color::RED, Color::RED));
            }
            other => panic!("expected oval, got {:?}", other),
        }
    }

    #[test]
    fn test_no_axes_draws_no_lines() {
        let plot = Plot::setup(DotPlot::new(b"ACGT", b"ACGT", options(1, 1, false)).unwrap(), 1.0).unwrap();
        let mut surface = RecordingSurface::new();
        plot.execute(&mut surface).unwrap();
        assert_eq!(surface.lines().count(), 0);
        assert_eq!(surface.ovals().count(), 4);
    }

    #[test]
    fn test_titles_drawn_at_absolute_position() {
        let opts = options(1, 1, true).with_names(Some("a".into()), None);
        let plot = Plot::setup(DotPlot::new(b"AC", b"AC", opts).unwrap(), 3.0).unwrap();
        let mut surface = RecordingSurface::new();
        plot.execute(&mut surface).unwrap();
        let text = surface
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { at, text, anchor, .. } => Some((*at, text.clone(), *anchor)),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, (DevicePoint::new(10 + 17, 6), "a".to_string(), Anchor::NW));
    }
}

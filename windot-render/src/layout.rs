//! Plot layout engine
//!
//! A [`Plot`] owns a [`PlotContent`] and the [`PlotGeometry`] computed from
//! it. Layout happens once in [`Plot::setup`]; every error is raised there,
//! before a surface sees a single call. [`Plot::execute`] then draws axes,
//! tics, titles and content in that order.

use windot_core::geometry::{round_half_even, validate_scale};
use windot_core::{AxisWidths, PlotDimensions, PlotError, PlotGeometry, PlotResult};

use crate::surface::{Anchor, Color, DrawingSurface, Font, OvalStyle};

/// Axis and tic thickness in content units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisStyle {
    pub x_axis_width: i64,
    pub y_axis_width: i64,
    pub x_tic_length: i64,
    pub y_tic_length: i64,
    pub x_tic_width: i64,
    pub y_tic_width: i64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            x_axis_width: 2,
            y_axis_width: 2,
            x_tic_length: 12,
            y_tic_length: 12,
            x_tic_width: 1,
            y_tic_width: 1,
        }
    }
}

impl AxisStyle {
    pub fn axis_widths(&self) -> AxisWidths {
        AxisWidths::new(self.x_axis_width, self.y_axis_width)
    }
}

/// Capabilities a plot type supplies to the layout engine
pub trait PlotContent {
    /// Content width and height plus the four margins, for the given scale
    fn supply_dimensions(&self, scale: f64) -> PlotResult<PlotDimensions>;

    fn draw_content(&self, painter: &mut Painter<'_>) -> PlotResult<()>;

    /// Prefix of default window titles
    fn plot_name(&self) -> &str {
        "Plot"
    }

    fn axis_style(&self) -> AxisStyle {
        AxisStyle::default()
    }

    /// Distance between tic marks; `None` draws no tics
    fn tic_spacing(&self) -> Option<i64> {
        None
    }

    fn draw_titles(&self, _painter: &mut Painter<'_>) -> PlotResult<()> {
        Ok(())
    }

    fn background(&self) -> Color {
        Color::WHITE
    }
}

/// Drawing helpers in content coordinates, bound to one geometry and one surface
pub struct Painter<'a> {
    geometry: &'a PlotGeometry,
    surface: &'a mut dyn DrawingSurface,
}

impl<'a> Painter<'a> {
    pub fn new(geometry: &'a PlotGeometry, surface: &'a mut dyn DrawingSurface) -> Self {
        Self { geometry, surface }
    }

    pub fn geometry(&self) -> &PlotGeometry {
        self.geometry
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) {
        let from = self.geometry.to_device(x1, y1);
        let to = self.geometry.to_device(x2, y2);
        let width = self.geometry.scale_width(width);
        self.surface.line(from, to, width, color);
    }

    /// Line relative to the origin with neither coordinates nor width scaled
    pub fn line_unscaled(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: i64, color: Color) {
        let from = self.geometry.to_device_unscaled(x1, y1);
        let to = self.geometry.to_device_unscaled(x2, y2);
        self.surface.line(from, to, width, color);
    }

    pub fn oval(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, fill: Color, outline: Color) {
        let corner1 = self.geometry.to_device(x1, y1);
        let corner2 = self.geometry.to_device(x2, y2);
        let style = OvalStyle {
            width: self.geometry.scale_width(width),
            fill,
            outline,
        };
        self.surface.oval(corner1, corner2, style);
    }

    /// Rectangle anchored at a scaled corner; `w` and `h` are device units
    pub fn rectangle(&mut self, x: f64, y: f64, w: i64, h: i64, fill: Color) {
        let corner = self.geometry.to_device(x, y);
        let opposite = windot_core::DevicePoint::new(corner.x + w, corner.y - h);
        self.surface.rectangle(corner, opposite, fill);
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str, font: &Font, anchor: Anchor, color: Color) {
        let at = self.geometry.to_device(x, y);
        self.surface.text(at, text, font, anchor, color);
    }

    /// Text at absolute canvas coordinates, no origin offset and no scaling
    pub fn text_unscaled(&mut self, x: i64, y: i64, text: &str, font: &Font, anchor: Anchor, color: Color) {
        self.surface
            .text(windot_core::DevicePoint::new(x, y), text, font, anchor, color);
    }
}

/// A laid-out plot ready to be drawn any number of times
#[derive(Debug, Clone)]
pub struct Plot<C: PlotContent> {
    content: C,
    geometry: PlotGeometry,
    style: AxisStyle,
}

impl<C: PlotContent> Plot<C> {
    pub fn setup(content: C, scale: f64) -> PlotResult<Self> {
        validate_scale(scale)?;
        let style = content.axis_style();
        let dimensions = content.supply_dimensions(scale)?;
        let geometry = PlotGeometry::new(dimensions, style.axis_widths(), scale)?;
        for (name, value) in [
            ("x_tic_length", style.x_tic_length),
            ("y_tic_length", style.y_tic_length),
            ("x_tic_width", style.x_tic_width),
            ("y_tic_width", style.y_tic_width),
        ] {
            if value < 0 {
                return Err(PlotError::invalid_parameter(name, value, "must be non-negative"));
            }
        }
        Ok(Self { content, geometry, style })
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    pub fn axis_style(&self) -> AxisStyle {
        self.style
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.geometry.canvas_width.max(0) as u32,
            self.geometry.canvas_height.max(0) as u32,
        )
    }

    pub fn execute(&self, surface: &mut dyn DrawingSurface) -> PlotResult<()> {
        let (width, height) = self.canvas_size();
        surface.begin(width, height, self.content.background());

        let mut painter = Painter::new(&self.geometry, surface);
        self.draw_axes(&mut painter);
        self.draw_tics(&mut painter);
        self.content.draw_titles(&mut painter)?;
        self.content.draw_content(&mut painter)
    }

    fn draw_axes(&self, painter: &mut Painter<'_>) {
        let s = &self.style;
        let x_adjust = round_half_even(s.x_axis_width as f64 / 2.0) as f64;
        let y_adjust = round_half_even(s.y_axis_width as f64 / 2.0) as f64;
        let width = self.geometry.content_width() as f64;
        let height = self.geometry.content_height() as f64;

        if s.x_axis_width > 0 {
            painter.line(-x_adjust, -y_adjust, width - x_adjust, -y_adjust, s.x_axis_width as f64, Color::BLACK);
        }
        if s.y_axis_width > 0 {
            painter.line(-x_adjust, -y_adjust, -x_adjust, height - y_adjust, s.y_axis_width as f64, Color::BLACK);
        }
    }

    fn draw_tics(&self, painter: &mut Painter<'_>) {
        let Some(spacing) = self.content.tic_spacing().filter(|&s| s > 0) else {
            return;
        };
        let s = &self.style;

        if s.x_axis_width > 0 {
            // shifted by the same adjust as the y tics; both axes stay symmetric
            let adjust = round_half_even((s.x_tic_width - 1) as f64 / 2.0);
            let (y1, y2) = (-s.x_axis_width, -(s.x_axis_width + s.x_tic_length));
            for x in tic_positions(spacing, self.geometry.content_width()) {
                let x = (x - adjust) as f64;
                painter.line(x, y1 as f64, x, y2 as f64, s.x_tic_width as f64, Color::BLACK);
            }
        }
        if s.y_axis_width > 0 {
            let adjust = round_half_even((s.y_tic_width - 1) as f64 / 2.0);
            let (x1, x2) = (-s.y_axis_width, -(s.y_axis_width + s.y_tic_length));
            for y in tic_positions(spacing, self.geometry.content_height()) {
                let y = (y + adjust) as f64;
                painter.line(x1 as f64, y, x2 as f64, y, s.y_tic_width as f64, Color::BLACK);
            }
        }
    }
}

/// Multiples of `spacing` in `[spacing, extent]`
fn tic_positions(spacing: i64, extent: i64) -> impl Iterator<Item = i64> {
    (1..).map(move |n| n * spacing).take_while(move |&v| v <= extent)
}

type DimensionsFn = Box<dyn Fn(f64) -> Vec<f64>>;
type DrawFn = Box<dyn Fn(&mut Painter<'_>)>;

/// Plot content assembled from closures
///
/// The dimension callback returns raw numbers; anything other than six
/// finite non-negative values fails layout with `InvalidGeometry`.
#[derive(Default)]
pub struct ClosurePlot {
    name: Option<String>,
    dimensions: Option<DimensionsFn>,
    draw: Option<DrawFn>,
    style: AxisStyle,
}

impl ClosurePlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_dimensions(mut self, f: impl Fn(f64) -> Vec<f64> + 'static) -> Self {
        self.dimensions = Some(Box::new(f));
        self
    }

    pub fn with_draw(mut self, f: impl Fn(&mut Painter<'_>) + 'static) -> Self {
        self.draw = Some(Box::new(f));
        self
    }

    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }
}

impl PlotContent for ClosurePlot {
    fn supply_dimensions(&self, scale: f64) -> PlotResult<PlotDimensions> {
        let dimensions = self
            .dimensions
            .as_ref()
            .ok_or(PlotError::NotImplemented("supply_dimensions"))?;
        if self.draw.is_none() {
            return Err(PlotError::NotImplemented("draw_content"));
        }
        PlotDimensions::try_from(dimensions(scale).as_slice())
    }

    fn draw_content(&self, painter: &mut Painter<'_>) -> PlotResult<()> {
        let draw = self.draw.as_ref().ok_or(PlotError::NotImplemented("draw_content"))?;
        draw(painter);
        Ok(())
    }

    fn plot_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Plot")
    }

    fn axis_style(&self) -> AxisStyle {
        self.style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotId(usize);

struct PlotEntry<C: PlotContent> {
    id: PlotId,
    title: String,
    plot: Plot<C>,
}

/// Caller-owned collection of open plots
pub struct PlotSet<C: PlotContent> {
    entries: Vec<PlotEntry<C>>,
    next_id: usize,
    plot_number: usize,
}

impl<C: PlotContent> Default for PlotSet<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            plot_number: 0,
        }
    }
}

impl<C: PlotContent> PlotSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plot; without a title it is named `"<plot name> <n>"`
    pub fn add(&mut self, plot: Plot<C>, title: Option<String>) -> PlotId {
        let title = match title.filter(|t| !t.is_empty()) {
            Some(title) => title,
            None => {
                self.plot_number += 1;
                format!("{} {}", plot.content().plot_name(), self.plot_number)
            }
        };
        let id = PlotId(self.next_id);
        self.next_id += 1;
        log::debug!("Opened plot '{}'", title);
        self.entries.push(PlotEntry { id, title, plot });
        id
    }

    pub fn get(&self, id: PlotId) -> Option<&Plot<C>> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.plot)
    }

    pub fn title(&self, id: PlotId) -> Option<&str> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlotId, &str, &Plot<C>)> {
        self.entries.iter().map(|e| (e.id, e.title.as_str(), &e.plot))
    }

    /// Close one plot, returning its title
    pub fn close(&mut self, id: PlotId) -> Option<String> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(index);
        log::debug!("Closed plot '{}'", entry.title);
        Some(entry.title)
    }

    /// Close every plot in insertion order
    pub fn close_all(&mut self) -> Vec<String> {
        let titles: Vec<String> = self.entries.drain(..).map(|e| e.title).collect();
        if !titles.is_empty() {
            log::debug!("Closed {} plots", titles.len());
        }
        titles
    }
}

//! Figure layout and drawing
//!
//! A [`Figure`] collects plots and draws them, together with axes, tick
//! labels, a title and a legend, onto a character [`Canvas`].

use std::fmt;

use tplot_core::{LegendLoc, PlotKind, TplotError, Value, is_numerical};
use tracing::debug;

pub mod canvas;
pub mod format;
pub mod scale;
pub mod ticks;

pub use canvas::{Canvas, line_segment};
use format::{center, format_general, ljust, rjust, truncate};
use scale::{LinearScale, NominalScale, Scale, distinct_labels};
use ticks::best_ticks;

const FALLBACK_SIZE: (usize, usize) = (80, 24);
const LEGEND_TITLE: &str = "Legend";
/// Significant digits shown in numeric tick labels
const TICK_PRECISION: usize = 2;

/// One series waiting to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub kind: PlotKind,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    pub marker: char,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Figure {
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    width: usize,
    height: usize,
    legend_loc: LegendLoc,
    xtick_label_length: usize,
    plots: Vec<Plot>,
}

/// Scales and axis geometry computed for one draw
struct Layout {
    xscale: Scale,
    yscale: Scale,
    xticks: Vec<Value>,
    yticks: Vec<Value>,
    yaxis_width: usize,
    xaxis_height: usize,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// A figure sized to the terminal, leaving one row for the prompt
    #[must_use]
    pub fn new() -> Self {
        let (width, height) = terminal_size();
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            width,
            height: height.saturating_sub(1),
            legend_loc: LegendLoc::default(),
            xtick_label_length: 7,
            plots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    #[must_use]
    pub fn with_ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = Some(ylabel.into());
        self
    }

    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub const fn with_size(self, width: usize, height: usize) -> Self {
        self.with_width(width).with_height(height)
    }

    #[must_use]
    pub const fn with_legend_loc(mut self, legend_loc: LegendLoc) -> Self {
        self.legend_loc = legend_loc;
        self
    }

    /// Room given to each x tick label; also decides how many x ticks fit
    #[must_use]
    pub fn with_xtick_label_length(mut self, length: usize) -> Self {
        self.xtick_label_length = length.max(1);
        self
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// `(marker, label)` for every labelled plot, in insertion order
    #[must_use]
    pub fn legend_entries(&self) -> Vec<(char, &str)> {
        self.plots
            .iter()
            .filter_map(|p| p.label.as_deref().map(|label| (p.marker, label)))
            .collect()
    }

    /// Add a series of any kind
    ///
    /// # Errors
    ///
    /// Returns `TplotError` if x and y differ in length, are empty, or hold
    /// a non-finite number
    pub fn plot<X, Y>(
        &mut self,
        kind: PlotKind,
        x: X,
        y: Y,
        marker: Option<char>,
        label: Option<&str>,
    ) -> Result<&mut Self, TplotError>
    where
        X: IntoIterator,
        X::Item: Into<Value>,
        Y: IntoIterator,
        Y::Item: Into<Value>,
    {
        let x: Vec<Value> = x.into_iter().map(Into::into).collect();
        let y: Vec<Value> = y.into_iter().map(Into::into).collect();
        if x.len() != y.len() {
            return Err(TplotError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(TplotError::EmptySeries);
        }
        if let Some(value) = x
            .iter()
            .chain(&y)
            .filter_map(Value::as_number)
            .find(|n| !n.is_finite())
        {
            return Err(TplotError::NonFiniteValue { value });
        }

        self.plots.push(Plot {
            kind,
            x,
            y,
            marker: marker.unwrap_or_else(|| kind.default_marker()),
            label: label.map(str::to_string),
        });
        Ok(self)
    }

    /// Add a scatter plot (default marker `o`)
    ///
    /// # Errors
    ///
    /// See [`Figure::plot`]
    pub fn scatter<X, Y>(
        &mut self,
        x: X,
        y: Y,
        marker: Option<char>,
        label: Option<&str>,
    ) -> Result<&mut Self, TplotError>
    where
        X: IntoIterator,
        X::Item: Into<Value>,
        Y: IntoIterator,
        Y::Item: Into<Value>,
    {
        self.plot(PlotKind::Scatter, x, y, marker, label)
    }

    /// Add a line plot (default marker `*`)
    ///
    /// # Errors
    ///
    /// See [`Figure::plot`]
    pub fn line<X, Y>(
        &mut self,
        x: X,
        y: Y,
        marker: Option<char>,
        label: Option<&str>,
    ) -> Result<&mut Self, TplotError>
    where
        X: IntoIterator,
        X::Item: Into<Value>,
        Y: IntoIterator,
        Y::Item: Into<Value>,
    {
        self.plot(PlotKind::Line, x, y, marker, label)
    }

    /// Add a vertical bar plot (default marker `#`)
    ///
    /// # Errors
    ///
    /// See [`Figure::plot`]
    pub fn bar<X, Y>(
        &mut self,
        x: X,
        y: Y,
        marker: Option<char>,
        label: Option<&str>,
    ) -> Result<&mut Self, TplotError>
    where
        X: IntoIterator,
        X::Item: Into<Value>,
        Y: IntoIterator,
        Y::Item: Into<Value>,
    {
        self.plot(PlotKind::Bar, x, y, marker, label)
    }

    /// Add a horizontal bar plot (default marker `#`)
    ///
    /// # Errors
    ///
    /// See [`Figure::plot`]
    pub fn hbar<X, Y>(
        &mut self,
        x: X,
        y: Y,
        marker: Option<char>,
        label: Option<&str>,
    ) -> Result<&mut Self, TplotError>
    where
        X: IntoIterator,
        X::Item: Into<Value>,
        Y: IntoIterator,
        Y::Item: Into<Value>,
    {
        self.plot(PlotKind::HBar, x, y, marker, label)
    }

    /// Draw everything onto a fresh canvas
    ///
    /// # Errors
    ///
    /// Returns `TplotError::NoData` without plots and
    /// `TplotError::FigureTooSmall` when the axes leave no plot area,
    /// `TplotError::FigureTooLarge` when the canvas would be too big
    pub fn draw(&self) -> Result<Canvas, TplotError> {
        if self.plots.is_empty() {
            return Err(TplotError::NoData);
        }
        let mut canvas = Canvas::new(self.width, self.height)?;
        let layout = self.layout()?;

        if let Some(title) = &self.title {
            let title = truncate(title, self.width);
            canvas.write_text(0, 0..to_i64(self.width), &center(title, self.width, ' '));
        }

        self.draw_x_axis(&mut canvas, &layout);
        self.draw_y_axis(&mut canvas, &layout);

        for plot in &self.plots {
            self.draw_plot(&mut canvas, &layout, plot);
        }
        if self.plots.iter().any(|p| p.label.is_some()) {
            self.draw_legend(&mut canvas, &layout);
        }
        Ok(canvas)
    }

    /// Draw and return the figure as text, one line per row
    ///
    /// # Errors
    ///
    /// See [`Figure::draw`]
    pub fn render(&self) -> Result<String, TplotError> {
        Ok(self.draw()?.to_string())
    }

    /// Draw the figure to stdout
    ///
    /// # Errors
    ///
    /// See [`Figure::draw`]
    pub fn show(&self) -> Result<(), TplotError> {
        println!("{}", self.render()?);
        Ok(())
    }

    fn all_x(&self) -> Vec<Value> {
        self.plots.iter().flat_map(|p| p.x.iter().cloned()).collect()
    }

    fn all_y(&self) -> Vec<Value> {
        self.plots.iter().flat_map(|p| p.y.iter().cloned()).collect()
    }

    fn layout(&self) -> Result<Layout, TplotError> {
        let too_small = || TplotError::FigureTooSmall {
            width: self.width,
            height: self.height,
        };
        let x = self.all_x();
        let y = self.all_y();
        let title = usize::from(self.title.is_some());
        let has_xlabel = usize::from(self.xlabel.is_some());
        let has_ylabel = usize::from(self.ylabel.is_some());

        let yticks = axis_ticks(&y, self.height / 2);
        let yaxis_width = yticks
            .iter()
            .map(|t| tick_label(t).chars().count())
            .max()
            .unwrap_or(0)
            + 1
            + 2 * has_ylabel;
        let xaxis_height = 2 + has_xlabel;

        let y_target_min = xaxis_height - has_xlabel + 1;
        let y_target_max = self
            .height
            .checked_sub(1 + title)
            .filter(|max| *max > y_target_min)
            .ok_or_else(too_small)?;
        let yscale = axis_scale(&y, &yticks, y_target_min, y_target_max);

        let xticks = axis_ticks(&x, self.width / self.xtick_label_length);
        let x_target_min = yaxis_width;
        let x_target_max = self
            .width
            .checked_sub(1)
            .filter(|max| *max > x_target_min)
            .ok_or_else(too_small)?;
        let xscale = axis_scale(&x, &xticks, x_target_min, x_target_max);

        debug!(
            width = self.width,
            height = self.height,
            plots = self.plots.len(),
            x_ticks = xticks.len(),
            y_ticks = yticks.len(),
            yaxis_width,
            "laid out figure"
        );
        Ok(Layout {
            xscale,
            yscale,
            xticks,
            yticks,
            yaxis_width,
            xaxis_height,
        })
    }

    /// Canvas row of a y position
    fn row(&self, y: i64) -> i64 {
        to_i64(self.height) - 1 - y
    }

    fn draw_x_axis(&self, canvas: &mut Canvas, layout: &Layout) {
        let ticks = tick_positions(&layout.xscale, &layout.xticks);
        let (Some(&(start, _)), Some(&(end, _))) = (ticks.first(), ticks.last()) else {
            return;
        };
        let axis_row = to_i64(self.height) - to_i64(layout.xaxis_height);
        let label_length = self.xtick_label_length;
        let before = label_length / 2;
        let after = label_length - before;
        let (before_i, after_i) = (to_i64(before), to_i64(after));

        canvas.hline(axis_row, start..end, '-');
        for (pos, label) in &ticks {
            let pos = *pos;
            canvas.put(axis_row, pos, '+');
            if pos == start {
                let text = ljust(truncate(label, after), after, ' ');
                canvas.write_text(axis_row + 1, pos..pos + after_i, &text);
            } else if pos == end {
                let text = rjust(truncate(label, before + 1), before + 1, ' ');
                canvas.write_text(axis_row + 1, pos - before_i..pos + 1, &text);
            } else {
                let text = center(truncate(label, label_length), label_length, ' ');
                canvas.write_text(axis_row + 1, pos - before_i..pos + after_i, &text);
            }
        }

        if let Some(xlabel) = &self.xlabel {
            let span = usize::try_from(end - start).unwrap_or(0);
            let text = center(truncate(xlabel, span), span, ' ');
            canvas.write_text(to_i64(self.height) - 1, start..end, &text);
        }
    }

    fn draw_y_axis(&self, canvas: &mut Canvas, layout: &Layout) {
        let ticks = tick_positions(&layout.yscale, &layout.yticks);
        let (Some(&(start, _)), Some(&(end, _))) = (ticks.first(), ticks.last()) else {
            return;
        };
        let axis_col = to_i64(layout.yaxis_width) - 1;
        let label_col = if self.ylabel.is_some() { 2 } else { 0 };
        let label_width = usize::try_from(axis_col - label_col).unwrap_or(0);

        canvas.vline(axis_col, self.row(end)..self.row(start) + 1, '|');
        for (pos, label) in &ticks {
            let row = self.row(*pos);
            canvas.put(row, axis_col, '+');
            let text = rjust(truncate(label, label_width), label_width, ' ');
            canvas.write_text(row, label_col..axis_col, &text);
        }

        if let Some(ylabel) = &self.ylabel {
            let span = usize::try_from(end - start).unwrap_or(0);
            let text = center(truncate(ylabel, span), span, ' ');
            let top = self.row(end);
            canvas.write_text_vertical(0, top..top + to_i64(span), &text);
        }
    }

    fn draw_plot(&self, canvas: &mut Canvas, layout: &Layout, plot: &Plot) {
        let points = plot_positions(layout, plot);
        let marker = plot.marker;
        match plot.kind {
            PlotKind::Scatter => {
                for &(x, y) in &points {
                    canvas.put(self.row(round(y)), round(x), marker);
                }
            }
            PlotKind::Line => {
                for pair in points.windows(2) {
                    let (x0, y0) = pair[0];
                    let (x1, y1) = pair[1];
                    for (x, y) in line_segment(round(x0), round(y0), round(x1), round(y1)) {
                        canvas.put(self.row(y), x, marker);
                    }
                }
            }
            PlotKind::Bar => {
                let bottom = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
                let bottom_row = to_i64(self.height) - trunc(bottom);
                for &(x, y) in &points {
                    canvas.vline(round(x), self.row(round(y))..bottom_row, marker);
                }
            }
            PlotKind::HBar => {
                let start = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
                for &(x, y) in &points {
                    canvas.hline(self.row(round(y)), trunc(start)..round(x), marker);
                }
            }
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, layout: &Layout) {
        let entries: Vec<String> = self
            .legend_entries()
            .into_iter()
            .map(|(marker, label)| format!("{marker} {label}"))
            .collect();
        let inner = entries
            .iter()
            .map(|e| e.chars().count())
            .max()
            .unwrap_or(0)
            .max(LEGEND_TITLE.len());
        let box_width = inner + 2;
        let box_height = entries.len() + 2;

        let points: Vec<(f64, f64)> = self
            .plots
            .iter()
            .flat_map(|plot| plot_positions(layout, plot))
            .collect();
        let (x_min, x_max, y_min, y_max) = points.iter().fold(
            (
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |(x_lo, x_hi, y_lo, y_hi), &(x, y)| (x_lo.min(x), x_hi.max(x), y_lo.min(y), y_hi.max(y)),
        );

        let height = to_i64(self.height);
        let top = if self.legend_loc.is_top() {
            height - trunc(y_max) - 1
        } else {
            height - trunc(y_min) - to_i64(box_height)
        };
        let left = if self.legend_loc.is_right() {
            trunc(x_max) - to_i64(box_width) + 1
        } else {
            trunc(x_min)
        };
        let cols = left..left + to_i64(box_width);

        canvas.write_text(
            top,
            cols.clone(),
            &format!("+{}+", center(LEGEND_TITLE, inner, '-')),
        );
        for (i, entry) in entries.iter().enumerate() {
            canvas.write_text(
                top + 1 + to_i64(i),
                cols.clone(),
                &format!("|{}|", ljust(entry, inner, ' ')),
            );
        }
        canvas.write_text(
            top + to_i64(entries.len()) + 1,
            cols,
            &format!("+{}+", "-".repeat(inner)),
        );
    }
}

/// Shows the error text instead of a figure when drawing fails
impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(rendered) => f.write_str(&rendered),
            Err(e) => write!(f, "{e}"),
        }
    }
}

fn terminal_size() -> (usize, usize) {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, rows)| (usize::from(cols), usize::from(rows)))
        .filter(|(cols, rows)| *cols > 0 && *rows > 0)
        .unwrap_or(FALLBACK_SIZE)
}

/// Nice numbers for numeric data, distinct categories otherwise
fn axis_ticks(values: &[Value], most: usize) -> Vec<Value> {
    if is_numerical(values) {
        let (min, max) = values
            .iter()
            .filter_map(Value::as_number)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        best_ticks(min, max, most)
            .into_iter()
            .map(Value::Number)
            .collect()
    } else {
        distinct_labels(values)
            .into_iter()
            .map(Value::Label)
            .collect()
    }
}

/// Numeric scales are fitted to the ticks, which bracket the data
fn axis_scale(values: &[Value], ticks: &[Value], target_min: usize, target_max: usize) -> Scale {
    #[allow(clippy::cast_precision_loss)]
    let (target_min, target_max) = (target_min as f64, target_max as f64);
    if is_numerical(values) {
        Scale::Linear(LinearScale::fit(
            ticks.iter().filter_map(Value::as_number),
            target_min,
            target_max,
        ))
    } else {
        Scale::Nominal(NominalScale::fit(values, target_min, target_max))
    }
}

fn tick_label(tick: &Value) -> String {
    match tick {
        Value::Number(n) => format_general(*n, TICK_PRECISION),
        Value::Label(s) => s.clone(),
    }
}

/// Rounded position and label text for each tick
fn tick_positions(scale: &Scale, ticks: &[Value]) -> Vec<(i64, String)> {
    ticks
        .iter()
        .filter_map(|tick| scale.transform(tick).map(|p| (round(p), tick_label(tick))))
        .collect()
}

fn plot_positions(layout: &Layout, plot: &Plot) -> Vec<(f64, f64)> {
    plot.x
        .iter()
        .zip(&plot.y)
        .filter_map(|(x, y)| Some((layout.xscale.transform(x)?, layout.yscale.transform(y)?)))
        .collect()
}

/// Round half to even, as the axis positions are defined
#[allow(clippy::cast_possible_truncation)]
fn round(v: f64) -> i64 {
    v.round_ties_even() as i64
}

#[allow(clippy::cast_possible_truncation)]
fn trunc(v: f64) -> i64 {
    v as i64
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

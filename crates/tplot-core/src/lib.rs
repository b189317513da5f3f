//! Core types for tplot
//!
//! Values plotted on an axis, plot kinds, legend placement, and the error type
//! shared by every crate. Input locations are tracked for error reporting.

use std::fmt;
use std::str::FromStr;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }
}

/// Line and column position in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Convert byte span to line/column positions
pub struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(pos + 1);
            }
        }
        Self { line_starts }
    }

    #[must_use]
    pub fn position(&self, byte_offset: usize) -> Position {
        match self.line_starts.binary_search(&byte_offset) {
            Ok(line) => Position::new(line + 1, 1),
            Err(line) => {
                let line_start = self.line_starts[line - 1];
                Position::new(line, byte_offset - line_start + 1)
            }
        }
    }

    #[must_use]
    pub fn span_to_positions(&self, span: Span) -> (Position, Position) {
        (self.position(span.start), self.position(span.end))
    }
}

/// A single data point coordinate: a number or a category label
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Label(String),
}

impl Value {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Label(_) => None,
        }
    }

    /// Key used when the value sits on a nominal axis
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Label(s) => s.clone(),
        }
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(f64::from(n))
                }
            }
        )*
    };
}

value_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Label(s)
    }
}

/// True when every value is a number. An empty slice counts as numerical.
#[must_use]
pub fn is_numerical(values: &[Value]) -> bool {
    values.iter().all(Value::is_number)
}

/// Where the legend box is anchored inside the plot area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLoc {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl LegendLoc {
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }
}

impl FromStr for LegendLoc {
    type Err = TplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "topleft" => Ok(Self::TopLeft),
            "topright" => Ok(Self::TopRight),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(TplotError::InvalidLegendLoc(s.to_string())),
        }
    }
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// One marker per point
    Scatter,
    /// Straight segments between consecutive points
    Line,
    /// Vertical bars down to the series minimum
    Bar,
    /// Horizontal bars from the series minimum
    HBar,
}

impl PlotKind {
    #[must_use]
    pub const fn default_marker(self) -> char {
        match self {
            Self::Scatter => 'o',
            Self::Line => '*',
            Self::Bar | Self::HBar => '#',
        }
    }
}

impl FromStr for PlotKind {
    type Err = TplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scatter" => Ok(Self::Scatter),
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "hbar" => Ok(Self::HBar),
            _ => Err(TplotError::InvalidPlotKind(s.to_string())),
        }
    }
}

/// Error types, with location information where the input has one
#[derive(thiserror::Error, Debug)]
pub enum TplotError {
    #[error("tplot:{filename}:{line}:{column}: ERR_PARSE: {message}")]
    Parse {
        message: String,
        span: Span,
        filename: String,
        line: usize,
        column: usize,
    },

    #[error("ERR_LENGTH: x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("ERR_EMPTY: cannot plot an empty series")]
    EmptySeries,

    #[error("ERR_NON_FINITE: {value} cannot be placed on an axis")]
    NonFiniteValue { value: f64 },

    #[error("ERR_NO_DATA: nothing to plot")]
    NoData,

    #[error("ERR_TOO_SMALL: a {width}x{height} figure has no room for the plot area")]
    FigureTooSmall { width: usize, height: usize },

    #[error("ERR_TOO_LARGE: a {width}x{height} figure exceeds {max_cells} cells")]
    FigureTooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },

    #[error("ERR_UNKNOWN_COLUMN: {0}")]
    UnknownColumn(String),

    #[error("ERR_LEGEND_LOC: {0} (expected topleft, topright, bottomleft or bottomright)")]
    InvalidLegendLoc(String),

    #[error("ERR_PLOT_KIND: {0} (expected scatter, line, bar or hbar)")]
    InvalidPlotKind(String),
}

impl TplotError {
    #[must_use]
    pub fn parse(message: String, span: Span, source_map: &SourceMap, filename: &str) -> Self {
        let pos = source_map.position(span.start);
        Self::Parse {
            message,
            span,
            filename: filename.to_string(),
            line: pos.line,
            column: pos.column,
        }
    }

    /// Parse error reported by a decoder that only knows line and column
    #[must_use]
    pub fn parse_at(message: String, filename: &str, line: usize, column: usize) -> Self {
        Self::Parse {
            message,
            span: Span::dummy(),
            filename: filename.to_string(),
            line,
            column,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Parse { span, .. } => Some(*span),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
    }

    #[test]
    fn test_source_map() {
        let source = "x y\n1 2\n";
        let source_map = SourceMap::new(source);

        let pos = source_map.position(0);
        assert_eq!(pos, Position::new(1, 1));

        let pos = source_map.position(2);
        assert_eq!(pos, Position::new(1, 3));

        let pos = source_map.position(4);
        assert_eq!(pos, Position::new(2, 1));

        let (start, end) = source_map.span_to_positions(Span::new(4, 7));
        assert_eq!(start, Position::new(2, 1));
        assert_eq!(end, Position::new(2, 4));
    }

    #[test]
    fn test_parse_error_format() {
        let source = "x y\n1 2 3";
        let source_map = SourceMap::new(source);
        let error = TplotError::parse(
            "expected 2 fields, found 3".to_string(),
            Span::new(4, 9),
            &source_map,
            "data.txt",
        );

        let error_str = format!("{error}");
        assert!(error_str.contains("tplot:data.txt:2:1"));
        assert!(error_str.contains("ERR_PARSE"));
        assert_eq!(error.span(), Some(Span::new(4, 9)));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3), Value::Number(3.0));
        assert_eq!(Value::from(2.5_f32), Value::Number(2.5));
        assert_eq!(Value::from(7_usize), Value::Number(7.0));
        assert_eq!(Value::from("apples"), Value::Label("apples".to_string()));
        assert_eq!(Value::from(1.5).as_number(), Some(1.5));
        assert_eq!(Value::from("a").as_number(), None);
        assert_eq!(Value::from(2.0).label(), "2");
    }

    #[test]
    fn test_is_numerical() {
        assert!(is_numerical(&[]));
        assert!(is_numerical(&[Value::from(1), Value::from(2.5)]));
        assert!(!is_numerical(&[Value::from(1), Value::from("b")]));
    }

    #[test]
    fn test_legend_loc_parsing() {
        assert_eq!("topleft".parse::<LegendLoc>().unwrap(), LegendLoc::TopLeft);
        assert_eq!("Bottom-Right".parse::<LegendLoc>().unwrap(), LegendLoc::BottomRight);
        assert_eq!("bottom_left".parse::<LegendLoc>().unwrap(), LegendLoc::BottomLeft);
        assert_eq!(LegendLoc::default(), LegendLoc::TopRight);
        assert!("middle".parse::<LegendLoc>().is_err());
    }

    #[test]
    fn test_plot_kind_parsing() {
        assert_eq!("HBar".parse::<PlotKind>().unwrap(), PlotKind::HBar);
        assert_eq!(PlotKind::Scatter.default_marker(), 'o');
        assert_eq!(PlotKind::Line.default_marker(), '*');
        let err = "pie".parse::<PlotKind>().unwrap_err();
        assert!(format!("{err}").contains("ERR_PLOT_KIND"));
    }
}

//! Text-based plotting in the terminal
//!
//! Re-exports the workspace crates so a single dependency covers reading
//! data and drawing figures.

pub use tplot_core::{LegendLoc, PlotKind, SourceMap, Span, TplotError, Value, is_numerical};
pub use tplot_data::{DataReader, Table, index_column, json::read_json};
pub use tplot_figure::{Canvas, Figure, Plot};

pub use tplot_data as data;
pub use tplot_figure as figure;
pub use tplot_lexer as lexer;

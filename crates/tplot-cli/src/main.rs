//! tplot CLI
//!
//! Reads a table from a file or stdin and prints it as a text plot.

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::process;
use tplot_core::{LegendLoc, PlotKind, Value};
use tplot_data::json::read_json;
use tplot_data::{DataReader, Table, index_column};
use tplot_figure::Figure;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Auto,
    Text,
    Json,
}

#[derive(Debug, Clone)]
struct PlotOptions {
    kind: PlotKind,
    x: Option<String>,
    y: Vec<String>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    width: Option<usize>,
    height: Option<usize>,
    legend_loc: LegendLoc,
    legend: bool,
    marker: Option<char>,
    xtick_label_length: Option<usize>,
    format: InputFormat,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            kind: PlotKind::Scatter,
            x: None,
            y: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            width: None,
            height: None,
            legend_loc: LegendLoc::default(),
            legend: true,
            marker: None,
            xtick_label_length: None,
            format: InputFormat::Auto,
        }
    }
}

fn cli() -> Command {
    Command::new("tplot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plot tabular data as text in the terminal")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Data file to plot (stdin when absent or -)")
                .index(1),
        )
        .arg(
            Arg::new("kind")
                .short('k')
                .long("kind")
                .value_name("KIND")
                .help("Plot kind: scatter, line, bar or hbar")
                .default_value("scatter"),
        )
        .arg(
            Arg::new("x")
                .short('x')
                .long("x")
                .value_name("COLUMN")
                .help("Column for the x axis, by header name or 0-based index"),
        )
        .arg(
            Arg::new("y")
                .short('y')
                .long("y")
                .value_name("COLUMN")
                .help("Column to plot against x; repeat for several series")
                .action(ArgAction::Append),
        )
        .arg(Arg::new("title").short('t').long("title").value_name("TEXT"))
        .arg(Arg::new("xlabel").long("xlabel").value_name("TEXT"))
        .arg(Arg::new("ylabel").long("ylabel").value_name("TEXT"))
        .arg(
            Arg::new("width")
                .short('W')
                .long("width")
                .value_name("COLUMNS")
                .help("Figure width (defaults to the terminal width)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("height")
                .short('H')
                .long("height")
                .value_name("ROWS")
                .help("Figure height (defaults to the terminal height minus one)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("legend")
                .short('l')
                .long("legend")
                .value_name("LOCATION")
                .help("Legend location: topleft, topright, bottomleft or bottomright")
                .default_value("topright"),
        )
        .arg(
            Arg::new("no-legend")
                .long("no-legend")
                .help("Do not label series from the header")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("marker")
                .short('m')
                .long("marker")
                .value_name("CHAR")
                .help("Marker character for every series"),
        )
        .arg(
            Arg::new("xtick-label-length")
                .long("xtick-label-length")
                .value_name("N")
                .help("Room for each x tick label")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Input format")
                .value_parser(["auto", "text", "json"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log layout decisions to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let result = options_from_matches(&matches).and_then(|options| {
        match matches.get_one::<String>("file").map(String::as_str) {
            None | Some("-") => plot_stdin(&options),
            Some(path) => plot_file(path, &options),
        }
    });

    match result {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("tplot: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("tplot=debug,tplot_data=debug,tplot_figure=debug,warn")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn options_from_matches(matches: &ArgMatches) -> Result<PlotOptions> {
    let text = |id: &str| matches.get_one::<String>(id).cloned();

    let kind = text("kind")
        .map(|k| k.parse::<PlotKind>())
        .transpose()?
        .unwrap_or(PlotKind::Scatter);
    let legend_loc = text("legend")
        .map(|l| l.parse::<LegendLoc>())
        .transpose()?
        .unwrap_or_default();
    let marker = text("marker").map(|m| parse_marker(&m)).transpose()?;
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("text") => InputFormat::Text,
        Some("json") => InputFormat::Json,
        _ => InputFormat::Auto,
    };

    Ok(PlotOptions {
        kind,
        x: text("x"),
        y: matches
            .get_many::<String>("y")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        title: text("title"),
        xlabel: text("xlabel"),
        ylabel: text("ylabel"),
        width: matches.get_one::<usize>("width").copied(),
        height: matches.get_one::<usize>("height").copied(),
        legend_loc,
        legend: !matches.get_flag("no-legend"),
        marker,
        xtick_label_length: matches.get_one::<usize>("xtick-label-length").copied(),
        format,
    })
}

fn parse_marker(text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), None) => Ok(marker),
        _ => bail!("marker must be a single character, got {text:?}"),
    }
}

fn plot_stdin(options: &PlotOptions) -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;
    plot_string(&content, "<stdin>", options)
}

fn plot_file(path: &str, options: &PlotOptions) -> Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    plot_string(&content, path, options)
}

fn plot_string(input: &str, filename: &str, options: &PlotOptions) -> Result<String> {
    let table = read_table(input, filename, options.format)?;
    let figure = build_figure(&table, options)?;
    Ok(figure.render()?)
}

fn read_table(input: &str, filename: &str, format: InputFormat) -> Result<Table> {
    let format = match format {
        InputFormat::Auto => detect_format(input, filename),
        explicit => explicit,
    };
    debug!(filename, ?format, "reading table");
    let table = match format {
        InputFormat::Json => read_json(input, filename)?,
        InputFormat::Text | InputFormat::Auto => {
            DataReader::new_with_filename(input, filename)?.read()?
        }
    };
    Ok(table)
}

fn detect_format(input: &str, filename: &str) -> InputFormat {
    let is_json_file = std::path::Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let looks_like_json = input
        .trim_start()
        .starts_with(|c: char| c == '{' || c == '[');
    if is_json_file || looks_like_json {
        InputFormat::Json
    } else {
        InputFormat::Text
    }
}

fn markers(kind: PlotKind) -> &'static [char] {
    match kind {
        PlotKind::Scatter => &['o', 'x', '+', '@', '%'],
        PlotKind::Line => &['*', '.', '+', 'o', '~'],
        PlotKind::Bar | PlotKind::HBar => &['#', '=', '%', '@', '&'],
    }
}

fn build_figure(table: &Table, options: &PlotOptions) -> Result<Figure> {
    let mut figure = Figure::new().with_legend_loc(options.legend_loc);
    if let Some(width) = options.width {
        figure = figure.with_width(width);
    }
    if let Some(height) = options.height {
        figure = figure.with_height(height);
    }
    if let Some(length) = options.xtick_label_length {
        figure = figure.with_xtick_label_length(length);
    }
    if let Some(title) = &options.title {
        figure = figure.with_title(title);
    }
    if let Some(xlabel) = &options.xlabel {
        figure = figure.with_xlabel(xlabel);
    }
    if let Some(ylabel) = &options.ylabel {
        figure = figure.with_ylabel(ylabel);
    }

    let x_index = match &options.x {
        Some(selector) => Some(table.resolve(selector)?),
        None if table.width() >= 2 => Some(0),
        None => None,
    };
    let y_indices: Vec<usize> = if options.y.is_empty() {
        (0..table.width()).filter(|i| Some(*i) != x_index).collect()
    } else {
        options
            .y
            .iter()
            .map(|selector| table.resolve(selector))
            .collect::<Result<_, _>>()?
    };
    if y_indices.is_empty() {
        bail!("no columns left to plot against the x column");
    }

    let x_values: Vec<Value> = x_index
        .and_then(|i| table.column(i))
        .map_or_else(|| index_column(table.len()), <[Value]>::to_vec);
    let palette = markers(options.kind);

    for (series, &index) in y_indices.iter().enumerate() {
        let Some(values) = table.column(index) else {
            bail!("column {index} does not exist");
        };
        let marker = options
            .marker
            .unwrap_or(palette[series % palette.len()]);
        let label = if options.legend {
            table.column_name(index)
        } else {
            None
        };
        debug!(series, column = index, ?label, %marker, "adding series");

        // Horizontal bars put the categories on the y axis
        let (x, y) = match options.kind {
            PlotKind::HBar => (values.to_vec(), x_values.clone()),
            _ => (x_values.clone(), values.to_vec()),
        };
        figure.plot(options.kind, x, y, Some(marker), label)?;
    }

    Ok(figure)
}

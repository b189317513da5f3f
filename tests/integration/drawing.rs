//! Integration tests for reader + figure pipeline
//! Tests that tables read from text or JSON draw as expected

use tplot::{DataReader, Figure, LegendLoc, TplotError, Value, index_column, read_json};

fn figure(width: usize, height: usize) -> Figure {
    Figure::default().with_size(width, height)
}

#[test]
fn test_text_table_to_scatter() {
    let table = DataReader::new("0 0\n1 1\n2 2\n").unwrap().read().unwrap();
    let mut fig = figure(40, 12);
    fig.scatter(
        table.column(0).unwrap().to_vec(),
        table.column(1).unwrap().to_vec(),
        None,
        None,
    )
    .unwrap();
    let rows: Vec<String> = fig.draw().unwrap().rows().collect();

    assert_eq!(rows.len(), 12);
    assert_eq!(&rows[0][..4], "  2+");
    assert_eq!(&rows[8][..4], "  0+");
    assert_eq!(rows[8].chars().nth(4), Some('o'));
    assert_eq!(rows[4].chars().nth(22), Some('o'));
    assert_eq!(rows[0].chars().nth(39), Some('o'));
}

#[test]
fn test_json_columns_with_legend() {
    let table = read_json(r#"{"day": [1, 2, 3, 4], "rain": [0, 3, 1, 2]}"#, "w.json").unwrap();
    let mut fig = figure(50, 14).with_legend_loc(LegendLoc::TopLeft);
    fig.line(
        table.column(0).unwrap().to_vec(),
        table.column(1).unwrap().to_vec(),
        None,
        table.column_name(1),
    )
    .unwrap();
    let text = fig.render().unwrap();

    assert!(text.contains("Legend"));
    assert!(text.contains("* rain"));
    assert_eq!(fig.legend_entries(), vec![('*', "rain")]);
}

#[test]
fn test_single_column_uses_row_index() {
    let table = read_json("[3, 1, 2]", "flat.json").unwrap();
    let x = index_column(table.len());
    assert_eq!(x, vec![Value::from(0), Value::from(1), Value::from(2)]);

    let mut fig = figure(30, 10);
    fig.bar(x, table.column(0).unwrap().to_vec(), None, None)
        .unwrap();
    let text = fig.render().unwrap();
    assert!(text.contains('#'));
}

#[test]
fn test_categorical_table_to_bar() {
    let table = DataReader::new("fruit count\nfig 3\nkiwi 5\nlime 2\n")
        .unwrap()
        .read()
        .unwrap();
    let mut fig = figure(40, 12);
    fig.bar(
        table.column(0).unwrap().to_vec(),
        table.column(1).unwrap().to_vec(),
        None,
        None,
    )
    .unwrap();
    let rows: Vec<String> = fig.draw().unwrap().rows().collect();

    let labels = rows.last().unwrap();
    assert!(labels.contains("kiwi"));
    assert!(labels.contains("lime"));
}

#[test]
fn test_figure_without_room_errors() {
    let mut fig = figure(30, 4);
    fig.scatter([1, 2], [3, 4], None, None).unwrap();
    assert!(matches!(
        fig.draw(),
        Err(TplotError::FigureTooSmall { .. })
    ));
}

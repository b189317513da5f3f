//! Integration tests for lexer + reader pipeline
//! Tests component interactions at the data input boundary

use tplot::lexer::{Lexer, Token};
use tplot::{DataReader, TplotError, Value, read_json};

#[test]
fn test_lexer_reader_mixed_separators() {
    let input = "# sensor log\nt, temp\n0, 21.5\n1 22\n2,\t22.5\n";
    let tokens = Lexer::new(input).tokenize();
    assert!(tokens.iter().all(|t| t.token != Token::Error));

    let table = DataReader::new(input).unwrap().read().unwrap();
    assert_eq!(table.headers().unwrap(), &["t".to_string(), "temp".to_string()]);
    assert_eq!(
        table.column(1).unwrap(),
        &[Value::from(21.5), Value::from(22), Value::from(22.5)]
    );
}

#[test]
fn test_reader_quoted_labels() {
    let table = DataReader::new("\"New York\" 8.3\n\"Paris\" 2.1\n")
        .unwrap()
        .read()
        .unwrap();
    assert!(table.headers().is_none());
    assert_eq!(
        table.column(0).unwrap(),
        &[Value::from("New York"), Value::from("Paris")]
    );
}

#[test]
fn test_reader_reports_ragged_row_location() {
    let err = DataReader::new_with_filename("1 2\n3 4\n5\n", "data.txt")
        .unwrap()
        .read()
        .unwrap_err();
    match &err {
        TplotError::Parse {
            filename,
            line,
            column,
            ..
        } => {
            assert_eq!(filename, "data.txt");
            assert_eq!(*line, 3);
            assert_eq!(*column, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("ERR_PARSE"));
}

#[test]
fn test_reader_rejects_empty_input() {
    let err = DataReader::new("# nothing here\n\n").unwrap().read().unwrap_err();
    assert!(matches!(err, TplotError::NoData));
}

#[test]
fn test_text_and_json_agree() {
    let text = DataReader::new("x y\n1 4\n2 5\n3 6\n").unwrap().read().unwrap();
    let json = read_json(r#"{"x": [1, 2, 3], "y": [4, 5, 6]}"#, "same.json").unwrap();
    assert_eq!(text, json);
}

#[test]
fn test_resolve_by_name_and_index() {
    let table = read_json(r#"{"a": [1], "b": [2], "c": [3]}"#, "cols.json").unwrap();
    assert_eq!(table.resolve("c").unwrap(), 2);
    assert_eq!(table.resolve("1").unwrap(), 1);
    assert!(matches!(
        table.resolve("d"),
        Err(TplotError::UnknownColumn(_))
    ));
}

//! Tabular data input for tplot
//!
//! Reads whitespace or comma separated text (via the logos lexer) and JSON
//! into a column-oriented [`Table`].

use tplot_core::{SourceMap, Span, TplotError, Value};
use tplot_lexer::{Lexer, SpannedToken, Token};
use tracing::debug;

pub mod json;

/// Column-oriented table of values
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Option<Vec<String>>,
    columns: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from columns of equal length
    ///
    /// # Errors
    ///
    /// Returns `TplotError::NoData` if there are no values, and
    /// `TplotError::LengthMismatch` if the columns differ in length.
    pub fn from_columns(
        headers: Option<Vec<String>>,
        columns: Vec<Vec<Value>>,
    ) -> Result<Self, TplotError> {
        let Some(first) = columns.first() else {
            return Err(TplotError::NoData);
        };
        if first.is_empty() {
            return Err(TplotError::NoData);
        }
        if let Some(other) = columns.iter().find(|c| c.len() != first.len()) {
            return Err(TplotError::LengthMismatch {
                x_len: first.len(),
                y_len: other.len(),
            });
        }
        Ok(Self { headers, columns })
    }

    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    #[must_use]
    pub fn columns(&self) -> &[Vec<Value>] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[Value]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|h| h.get(index))
            .map(String::as_str)
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a column by header name, falling back to a 0-based index
    ///
    /// # Errors
    ///
    /// Returns `TplotError::UnknownColumn` if nothing matches
    pub fn resolve(&self, selector: &str) -> Result<usize, TplotError> {
        if let Some(index) = self
            .headers
            .as_ref()
            .and_then(|h| h.iter().position(|name| name == selector))
        {
            return Ok(index);
        }
        match selector.parse::<usize>() {
            Ok(index) if index < self.width() => Ok(index),
            _ => Err(TplotError::UnknownColumn(format!(
                "{selector} (table has {} columns{})",
                self.width(),
                self.headers
                    .as_ref()
                    .map(|h| format!(": {}", h.join(", ")))
                    .unwrap_or_default()
            ))),
        }
    }
}

/// Row numbers `0..len`, used as x when no x column exists
#[must_use]
pub fn index_column(len: usize) -> Vec<Value> {
    (0..len).map(Value::from).collect()
}

pub struct DataReader {
    source_map: SourceMap,
    filename: String,
    tokens: Vec<SpannedToken>,
}

/// One parsed row with the span of its first field
struct Row {
    fields: Vec<Value>,
    span: Span,
}

impl DataReader {
    /// Create a new reader for the given input
    ///
    /// # Errors
    ///
    /// Returns `TplotError` if there are lexical errors in the input
    pub fn new(input: &str) -> Result<Self, TplotError> {
        Self::new_with_filename(input, "<input>")
    }

    /// Create a new reader for the given input with a filename
    ///
    /// # Errors
    ///
    /// Returns `TplotError` if there are lexical errors in the input
    pub fn new_with_filename(input: &str, filename: &str) -> Result<Self, TplotError> {
        let source_map = SourceMap::new(input);

        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize();

        for token in &tokens {
            if token.token == Token::Error {
                return Err(TplotError::parse(
                    format!("Unexpected character: {}", token.text),
                    token.span,
                    &source_map,
                    filename,
                ));
            }
        }

        Ok(Self {
            source_map,
            filename: filename.to_string(),
            tokens,
        })
    }

    /// Read the input into a table
    ///
    /// # Errors
    ///
    /// Returns `TplotError` on empty fields, ragged rows, or if the input
    /// holds no data rows
    pub fn read(&self) -> Result<Table, TplotError> {
        let mut rows = self.rows()?;
        if rows.is_empty() {
            return Err(TplotError::NoData);
        }

        let first_is_header = rows[0].fields.iter().all(|v| !v.is_number())
            && rows[1..]
                .iter()
                .any(|row| row.fields.iter().any(Value::is_number));
        let headers = if first_is_header {
            Some(rows.remove(0).fields.iter().map(Value::label).collect::<Vec<_>>())
        } else {
            None
        };

        let Some(first) = rows.first() else {
            return Err(TplotError::NoData);
        };
        let width = headers
            .as_ref()
            .map_or(first.fields.len(), Vec::len);

        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for row in rows {
            if row.fields.len() != width {
                return Err(self.error(
                    format!("expected {width} fields, found {}", row.fields.len()),
                    row.span,
                ));
            }
            for (column, value) in columns.iter_mut().zip(row.fields) {
                column.push(value);
            }
        }

        debug!(
            filename = %self.filename,
            columns = width,
            rows = columns.first().map_or(0, Vec::len),
            header = first_is_header,
            "read text table"
        );
        Table::from_columns(headers, columns)
    }

    fn rows(&self) -> Result<Vec<Row>, TplotError> {
        let mut rows = Vec::new();
        let mut fields = Vec::new();
        let mut row_span: Option<Span> = None;
        // A comma was seen and no field has followed it yet
        let mut pending_comma: Option<Span> = None;

        for token in &self.tokens {
            match token.token {
                Token::Number | Token::Word | Token::String => {
                    row_span.get_or_insert(token.span);
                    fields.push(self.field_value(token)?);
                    pending_comma = None;
                }
                Token::Comma => {
                    if fields.is_empty() || pending_comma.is_some() {
                        return Err(self.error("empty field".to_string(), token.span));
                    }
                    pending_comma = Some(token.span);
                }
                Token::Newline | Token::Eof => {
                    if let Some(span) = pending_comma.take() {
                        return Err(self.error("empty field".to_string(), span));
                    }
                    if let Some(span) = row_span.take() {
                        rows.push(Row {
                            fields: std::mem::take(&mut fields),
                            span,
                        });
                    }
                }
                Token::Comment | Token::Whitespace | Token::Error => {}
            }
        }
        Ok(rows)
    }

    fn field_value(&self, token: &SpannedToken) -> Result<Value, TplotError> {
        match token.token {
            Token::Number => token
                .text
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|e| self.error(format!("invalid number {}: {e}", token.text), token.span)),
            Token::String => Ok(Value::Label(unquote(&token.text))),
            _ => Ok(Value::Label(token.text.clone())),
        }
    }

    fn error(&self, message: String, span: Span) -> TplotError {
        TplotError::parse(message, span, &self.source_map, &self.filename)
    }
}

/// Strip surrounding double quotes and resolve backslash escapes
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

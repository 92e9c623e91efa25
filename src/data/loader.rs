use std::io::Read;

use thiserror::Error;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while turning an input file into a [`Table`].
/// Surfaced to the caller as-is; there is no retry logic.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reading input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text: ragged rows, bad quoting, invalid encoding.
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    #[error("input has no header row")]
    EmptyInput,
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV text from any reader into a [`Table`].
///
/// The first record is the header; every following record must have the same
/// number of fields (the csv reader rejects ragged rows). Cell values are
/// type-guessed per cell: integer, float, boolean, ISO date, else string.
pub fn parse_csv<R: Read>(input: R) -> Result<Table, ParseError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?;
    if headers.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let column_names: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::new(column_names, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    if is_iso_date(s) {
        return CellValue::Date(s.to_string());
    }
    CellValue::String(s.to_string())
}

/// `YYYY-MM-DD` shape check; the value stays text either way.
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && s.chars()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;

    #[test]
    fn dimensions_match_input() {
        let table = parse_csv("a,b,c\n1,2,3\n4,5,6\n7,8,9\n".as_bytes()).unwrap();
        assert_eq!(table.n_cols(), 3);
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column_names, vec!["a", "b", "c"]);
    }

    #[test]
    fn cell_types_are_guessed() {
        let table = parse_csv(
            "id,score,name,ok,day,note\n1,2.5,ada,true,2024-03-01,\n".as_bytes(),
        )
        .unwrap();
        let row = &table.rows[0];
        assert_eq!(row[0], CellValue::Integer(1));
        assert_eq!(row[1], CellValue::Float(2.5));
        assert_eq!(row[2], CellValue::String("ada".into()));
        assert_eq!(row[3], CellValue::Bool(true));
        assert_eq!(row[4], CellValue::Date("2024-03-01".into()));
        assert_eq!(row[5], CellValue::Null);
    }

    #[test]
    fn inferred_kinds_from_csv() {
        let table = parse_csv("x,label\n1,a\n2.5,b\n".as_bytes()).unwrap();
        assert_eq!(table.column_kind("x"), ColumnKind::Quantitative);
        assert_eq!(table.column_kind("label"), ColumnKind::Nominal);
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let result = parse_csv("a,b\n1,2\n3\n".as_bytes());
        assert!(matches!(result, Err(ParseError::Malformed(_))));
    }

    #[test]
    fn header_only_input_is_an_empty_table() {
        let table = parse_csv("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.n_cols(), 2);
        assert!(table.is_empty());
    }
}

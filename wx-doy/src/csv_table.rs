//! Header-keyed CSV parsing with a missing-value sentinel.
//!
//! The parser does no type coercion: every cell is either a string or `None`.
//! An empty cell, or a cell missing because the line is shorter than the
//! header, is `None`. Delimiter is `,` and quoting is not interpreted.

use crate::error::{Result, WxError};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

/// A parsed table of row-mappings keyed by header name.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

/// A borrowed view of one data line.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    values: &'a [Option<String>],
}

impl CsvTable {
    /// Parses `text` into row-mappings.
    ///
    /// Fails with [`WxError::Load`] when there is no header or no data line;
    /// callers treat that as "no data".
    pub fn parse(source_name: &str, text: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(WxError::load(source_name, "missing header line"));
        }
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect::<HashMap<_, _>>();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let values = (0..headers.len())
                .map(|i| {
                    record
                        .get(i)
                        .filter(|cell| !cell.is_empty())
                        .map(str::to_string)
                })
                .collect::<Vec<_>>();
            rows.push(values);
        }

        if rows.is_empty() {
            return Err(WxError::load(source_name, "no data rows"));
        }
        log::info!(
            "csv_table: parsed {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            source_name
        );
        Ok(Self {
            headers,
            columns,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }
}

impl<'a> Row<'a> {
    /// Raw cell value, `None` when empty or absent.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        let i = *self.columns.get(field)?;
        self.values.get(i)?.as_deref()
    }

    /// Cell value as a finite number; see [`parse_number`].
    pub fn number(&self, field: &str) -> Option<f64> {
        parse_number(self.get(field))
    }

    /// Cell value as an integer. Accepts integral floats such as `"59.0"`,
    /// which is how pandas writes a column that ever held a NaN.
    pub fn integer(&self, field: &str) -> Option<i64> {
        let raw = self.get(field)?;
        raw.parse::<i64>().ok().or_else(|| {
            parse_number(Some(raw))
                .filter(|v| v.fract() == 0.0)
                .map(|v| v as i64)
        })
    }
}

/// Converts a raw cell to a number. Unparseable and non-finite values are `None`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_keyed_by_header() {
        let table = CsvTable::parse(
            "daily",
            "\
Year,DOY_365,Tavg_C
2020,1,5.5
2020,2,6
",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers(), &["Year", "DOY_365", "Tavg_C"]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("Year"), Some("2020"));
        assert_eq!(rows[0].number("Tavg_C"), Some(5.5));
        assert_eq!(rows[1].integer("DOY_365"), Some(2));
    }

    #[test]
    fn empty_and_short_fields_are_missing() {
        let table = CsvTable::parse(
            "daily",
            "\
Year,DOY_365,Tavg_C,PRCP_mm
2020,1,,0
2020,2
",
        )
        .unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("Tavg_C"), None);
        assert_eq!(rows[0].number("PRCP_mm"), Some(0.0));
        assert_eq!(rows[1].get("Tavg_C"), None);
        assert_eq!(rows[1].get("PRCP_mm"), None);
        assert_eq!(rows[1].get("NoSuchColumn"), None);
    }

    #[test]
    fn header_only_is_a_load_error() {
        let err = CsvTable::parse("climatology", "DOY_365,Tavg_C\n").unwrap_err();
        assert!(err.is_load());
        assert!(err.to_string().contains("climatology"));
    }

    #[test]
    fn empty_text_is_a_load_error() {
        assert!(CsvTable::parse("daily", "").unwrap_err().is_load());
    }

    #[test]
    fn quotes_are_not_interpreted() {
        let table = CsvTable::parse("daily", "a,b\n\"x,y\n").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("a"), Some("\"x"));
        assert_eq!(row.get("b"), Some("y"));
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(None), None);
        assert_eq!(parse_number(Some("-2.5")), Some(-2.5));
    }

    #[test]
    fn integer_accepts_integral_floats() {
        let table = CsvTable::parse("daily", "DOY_365\n59.0\n59.5\n").unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].integer("DOY_365"), Some(59));
        assert_eq!(rows[1].integer("DOY_365"), None);
    }
}

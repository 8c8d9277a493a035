use std::path::Path;

use crate::error::{Result, ScopeError};

/// Header plus rows of a small delimited text file. Cells are trimmed; blank rows are skipped.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse `text`, ignoring the first `skip_lines` raw lines.
    pub fn parse(text: &str, delim: char, skip_lines: usize) -> Self {
        let mut lines = text
            .lines()
            .skip(skip_lines)
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty());
        let split = |line: &str| -> Vec<String> {
            line.split(delim).map(|c| c.trim().to_string()).collect()
        };
        let Some(first) = lines.next() else {
            return Self::default();
        };
        Self {
            header: split(first),
            rows: lines.map(split).collect(),
        }
    }

    pub fn read(path: &Path, delim: char, skip_lines: usize) -> Result<Self> {
        if !path.is_file() {
            return Err(ScopeError::NotFound(format!(
                "'{}' does not exist",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text, delim, skip_lines))
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str, path: &Path) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            ScopeError::SchemaViolation(format!(
                "column '{name}' is missing from '{}'",
                path.display()
            ))
        })
    }

    /// Cell at `(row, col)`; rows shorter than the header read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn parse_f64(cell: &str, path: &Path) -> Result<f64> {
    cell.parse::<f64>()
        .map_err(|_| ScopeError::parse(path, format!("'{cell}' is not a number")))
}

/// Integer cell; float spellings such as `10.0` are truncated.
pub fn parse_i64(cell: &str, path: &Path) -> Result<i64> {
    if let Ok(v) = cell.parse::<i64>() {
        return Ok(v);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v as i64),
        _ => Err(ScopeError::parse(path, format!("'{cell}' is not an integer"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_table() {
        let t = Table::parse("camNum\tsysClock\r\n1\t10\n\n2\t20\n", '\t', 0);
        assert_eq!(t.header, ["camNum", "sysClock"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(1, 1), "20");
        assert_eq!(t.cell(5, 0), "");
    }

    #[test]
    fn skips_raw_lines_before_header() {
        let t = Table::parse("a\tb\n1\t2\n\nelapsedTime\tNote\n100\thello\n", '\t', 3);
        assert_eq!(t.header, ["elapsedTime", "Note"]);
        assert_eq!(t.rows, vec![vec!["100".to_string(), "hello".to_string()]]);
    }

    #[test]
    fn integer_cells_accept_float_spelling() {
        let p = Path::new("x.dat");
        assert_eq!(parse_i64("10", p).unwrap(), 10);
        assert_eq!(parse_i64("255.0", p).unwrap(), 255);
        assert!(parse_i64("high", p).is_err());
        assert!(parse_f64("-1.5", p).is_ok());
    }
}

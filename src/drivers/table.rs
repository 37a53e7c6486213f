use ndarray::{Array2, ArrayView1, Axis};
use crate::types::Window;
/// Column count used when none is configured.
pub const DEFAULT_COLUMN_COUNT: usize = 10;
const FIELD_DELIMITER: char = ',';
/// Ordered column labels, fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNames(Vec<String>);
impl ColumnNames {
    /// `"var 0"`, `"var 1"`, ... up to `count`.
    pub fn positional(count: usize) -> Self {
        Self((0..count).map(|i| format!("var {i}")).collect())
    }
    /// Positional labels overridden left to right by `overrides`.
    ///
    /// Overrides past `count` are dropped; the number dropped is returned so the
    /// caller can report it.
    pub fn with_overrides(count: usize, overrides: &[String]) -> (Self, usize) {
        let mut names = Self::positional(count);
        for (slot, name) in names.0.iter_mut().zip(overrides) {
            slot.clone_from(name);
        }
        (names, overrides.len().saturating_sub(count))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}
/// A field that was present but failed numeric coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowParseWarning {
    pub row: usize,
    pub column: usize,
    pub raw: String,
}
/// Rows x columns of samples; `NaN` marks a missing value.
#[derive(Clone, Debug)]
pub struct SampleTable {
    columns: ColumnNames,
    values: Array2<f64>,
    warnings: Vec<RowParseWarning>,
}
impl SampleTable {
    /// Parses the window as headerless comma-delimited text.
    ///
    /// Blank lines yield no row. Short rows are padded with missing values and
    /// fields beyond the column count are ignored. Parsing never fails as a whole.
    pub fn parse(window: &Window, columns: &ColumnNames) -> Self {
        let width = columns.len();
        let blob = window.to_blob();
        let records: Vec<&str> = blob.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut values = Array2::from_elem((records.len(), width), f64::NAN);
        let mut warnings = Vec::new();
        for (row, (record, mut cells)) in records
            .iter()
            .zip(values.axis_iter_mut(Axis(0)))
            .enumerate()
        {
            for (column, field) in record.split(FIELD_DELIMITER).take(width).enumerate() {
                let field = unquote(field.trim());
                if field.is_empty() {
                    continue;
                }
                match field.parse::<f64>() {
                    Ok(v) => cells[column] = v,
                    Err(_) => {
                        log::debug!("row {row} column {column}: {field:?} is not numeric");
                        warnings.push(RowParseWarning {
                            row,
                            column,
                            raw: field.to_owned(),
                        });
                    }
                }
            }
        }
        Self {
            columns: columns.clone(),
            values,
            warnings,
        }
    }
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }
    pub fn row_count(&self) -> usize {
        self.values.nrows()
    }
    pub fn column_count(&self) -> usize {
        self.values.ncols()
    }
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.values
            .get((row, column))
            .copied()
            .filter(|v| !v.is_nan())
    }
    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        (0..self.column_count())
            .map(|column| self.value(row, column))
            .collect()
    }
    /// Raw column view; missing cells are `NaN`.
    pub fn column(&self, column: usize) -> ArrayView1<'_, f64> {
        self.values.column(column)
    }
    /// `(row index, value)` pairs for one column, split at missing or
    /// non-finite cells.
    pub fn runs(&self, column: usize) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for (row, &v) in self.column(column).iter().enumerate() {
            if !v.is_finite() {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            } else {
                current.push([row as f64, v]);
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
    /// Smallest and largest finite value in the table.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
    pub fn warnings(&self) -> &[RowParseWarning] {
        &self.warnings
    }
}
/// Drops one surrounding pair of double quotes, as CSV writers add them.
fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(field)
}
#[cfg(test)]
mod tests {
    use super::*;
    fn window(lines: &[&str]) -> Window {
        Window::from_lines(lines.iter().map(|l| l.to_string()))
    }
    #[test]
    fn parses_the_reference_window() {
        let names = ColumnNames::positional(3);
        let table = SampleTable::parse(&window(&["4,5,6", "7,8,9"]), &names);
        assert_eq!(table.columns().as_slice(), ["var 0", "var 1", "var 2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0), vec![Some(4.0), Some(5.0), Some(6.0)]);
        assert_eq!(table.row(1), vec![Some(7.0), Some(8.0), Some(9.0)]);
        assert!(table.warnings().is_empty());
    }
    #[test]
    fn non_numeric_field_becomes_missing() {
        let table = SampleTable::parse(&window(&["1,2,abc"]), &ColumnNames::positional(3));
        assert_eq!(table.row(0), vec![Some(1.0), Some(2.0), None]);
        assert_eq!(
            table.warnings(),
            [RowParseWarning {
                row: 0,
                column: 2,
                raw: "abc".into()
            }]
        );
    }
    #[test]
    fn quoted_numbers_are_read() {
        let line = r#""6", " 7.5 ","","x""#;
        let table = SampleTable::parse(&window(&[line]), &ColumnNames::positional(4));
        assert_eq!(table.row(0), vec![Some(6.0), Some(7.5), None, None]);
        assert_eq!(table.warnings().len(), 1);
        assert_eq!(table.warnings()[0].raw, "x");
    }
    #[test]
    fn short_row_is_padded_to_full_width() {
        let table = SampleTable::parse(&window(&["1.5", "2,3,4,5"]), &ColumnNames::positional(3));
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row(0), vec![Some(1.5), None, None]);
        assert_eq!(table.row(1), vec![Some(2.0), Some(3.0), Some(4.0)]);
        assert_eq!(table.missing_count(), 2);
        assert!(table.warnings().is_empty());
    }
    #[test]
    fn blank_lines_produce_no_rows() {
        let table = SampleTable::parse(
            &window(&["1,2", "", "  ", "3,4"]),
            &ColumnNames::positional(2),
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, 0), Some(3.0));
    }
    #[test]
    fn overrides_replace_leading_labels() {
        let (names, dropped) = ColumnNames::with_overrides(4, &["x".into(), "y".into()]);
        assert_eq!(names.as_slice(), ["x", "y", "var 2", "var 3"]);
        assert_eq!(dropped, 0);
    }
    #[test]
    fn extra_overrides_are_ignored() {
        let overrides: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let (names, dropped) = ColumnNames::with_overrides(2, &overrides);
        assert_eq!(names.as_slice(), ["a", "b"]);
        assert_eq!(dropped, 1);
    }
    #[test]
    fn runs_break_at_missing_values() {
        let table = SampleTable::parse(&window(&["1", "x", "3", "4"]), &ColumnNames::positional(1));
        assert_eq!(
            table.runs(0),
            vec![vec![[0.0, 1.0]], vec![[2.0, 3.0], [3.0, 4.0]]]
        );
        assert_eq!(table.value_range(), Some((1.0, 4.0)));
    }
}

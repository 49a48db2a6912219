//! 1-indexed sheet view with linear cell scans
//!
//! Coordinates follow spreadsheet convention: row 1 / column 1 is cell A1.
//! Scans are O(rows x cols) with no indexing; exported sheets are dozens of
//! rows and every scan runs once per assertion.

use calamine::{Data, DataType, Range};

/// A single decoded sheet.
///
/// Lookups on absent or out-of-range coordinates return `None`, so a failed
/// scan composes with [`Sheet::value_at`] through `Option` chaining instead
/// of `-1` sentinels.
pub struct Sheet {
    range: Range<Data>,
}

impl From<Range<Data>> for Sheet {
    fn from(range: Range<Data>) -> Self {
        Self { range }
    }
}

impl Sheet {
    /// Number of rows up to the last used cell.
    pub fn row_count(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// Number of columns up to the last used cell.
    pub fn col_count(&self) -> u32 {
        self.range.end().map(|(_, col)| col + 1).unwrap_or(0)
    }

    /// Direct cell lookup. `None` for coordinates outside the used area or
    /// below 1.
    pub fn value_at(&self, row: u32, col: u32) -> Option<&Data> {
        if row == 0 || col == 0 {
            return None;
        }
        self.range.get_value((row - 1, col - 1))
    }

    /// Scan down column `col` from `start_row` for the first string cell
    /// whose trimmed value equals `value`.
    pub fn find_row_by_value(&self, start_row: u32, col: u32, value: &str) -> Option<u32> {
        (start_row..=self.row_count())
            .find(|&row| self.cell_trim_eq(row, col, value))
    }

    /// Row-major scan from `(start_row, start_col)` to the sheet bounds for
    /// the first string cell whose trimmed value equals `value`.
    pub fn find_cell_by_value(
        &self,
        start_row: u32,
        start_col: u32,
        value: &str,
    ) -> Option<(u32, u32)> {
        for row in start_row..=self.row_count() {
            for col in start_col..=self.col_count() {
                if self.cell_trim_eq(row, col, value) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Scan across row `row` from `start_col` for the first string cell
    /// whose trimmed value equals `value`.
    pub fn find_col_by_row_and_value(&self, row: u32, start_col: u32, value: &str) -> Option<u32> {
        (start_col..=self.col_count())
            .find(|&col| self.cell_trim_eq(row, col, value))
    }

    /// Read consecutive cells of `row` starting at `start_col`, up to and
    /// excluding the first falsy cell (empty cell, empty string, `0`,
    /// `false`).
    pub fn values_from_row(&self, row: u32, start_col: u32) -> Vec<Data> {
        let mut values = Vec::new();
        let mut col = start_col;
        while let Some(value) = self.value_at(row, col) {
            if !is_truthy(value) {
                break;
            }
            values.push(value.clone());
            col += 1;
        }
        values
    }

    /// Whether some cell of header row `row` equals `column_name` exactly
    /// (no trimming).
    pub fn column_exists(&self, column_name: &str, row: u32) -> bool {
        (1..=self.col_count())
            .any(|col| self.cell_str(row, col) == Some(column_name))
    }

    /// Walk down column `col` from `start_row` looking for an exact string
    /// match. The walk stops at the first falsy cell, so values below a gap
    /// are not seen.
    pub fn value_exists_in_column(&self, col: u32, start_row: u32, value: &str) -> bool {
        let mut row = start_row;
        while let Some(cell) = self.value_at(row, col) {
            if !is_truthy(cell) {
                break;
            }
            if cell.get_string() == Some(value) {
                return true;
            }
            row += 1;
        }
        false
    }

    fn cell_str(&self, row: u32, col: u32) -> Option<&str> {
        self.value_at(row, col).and_then(|v| v.get_string())
    }

    fn cell_trim_eq(&self, row: u32, col: u32, value: &str) -> bool {
        self.cell_str(row, col).map(str::trim) == Some(value)
    }
}

/// Truthiness in the sense of the exporting UI: empty cells, empty strings,
/// numeric zero and `false` end a contiguous run.
fn is_truthy(value: &Data) -> bool {
    match value {
        Data::Empty => false,
        Data::String(s) => !s.is_empty(),
        Data::Int(i) => *i != 0,
        Data::Float(f) => *f != 0.0,
        Data::Bool(b) => *b,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Build a sheet from 1-indexed (row, col, value) triples.
    fn sheet(cells: &[(u32, u32, Data)]) -> Sheet {
        let max_row = cells.iter().map(|(r, _, _)| *r).max().unwrap();
        let max_col = cells.iter().map(|(_, c, _)| *c).max().unwrap();
        let mut range: Range<Data> = Range::new((0, 0), (max_row - 1, max_col - 1));
        for (row, col, value) in cells {
            range.set_value((row - 1, col - 1), value.clone());
        }
        Sheet::from(range)
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn export_fixture() -> Sheet {
        sheet(&[
            (1, 1, s("Contact Name")),
            (1, 2, s("Job Title")),
            (1, 3, s("Country")),
            (2, 1, s("Boiko Borisov")),
            (2, 2, s("Account Executive")),
            (2, 3, s("BG")),
            (3, 1, s("Pesho")),
            (3, 2, s(" Developer ")),
            (3, 3, Data::Float(42.0)),
        ])
    }

    #[test]
    fn find_row_by_value_scans_a_fixed_column() {
        let sheet = export_fixture();
        assert_eq!(sheet.find_row_by_value(1, 1, "Pesho"), Some(3));
        // Trimmed comparison
        assert_eq!(sheet.find_row_by_value(1, 2, "Developer"), Some(3));
        // Matches above the start row are skipped
        assert_eq!(sheet.find_row_by_value(3, 1, "Boiko Borisov"), None);
    }

    #[test]
    fn find_row_by_value_ignores_non_string_cells() {
        let sheet = export_fixture();
        assert_eq!(sheet.find_row_by_value(1, 3, "42"), None);
    }

    #[test_case("Pesho", Some((3, 1)) ; "present")]
    #[test_case("Account Executive", Some((2, 2)) ; "mid sheet")]
    #[test_case("Gosho", None ; "absent scans to the bounds")]
    fn find_cell_by_value_scans_row_major(value: &str, expected: Option<(u32, u32)>) {
        assert_eq!(export_fixture().find_cell_by_value(1, 1, value), expected);
    }

    #[test]
    fn find_cell_by_value_returns_first_in_reading_order() {
        let sheet = sheet(&[
            (1, 3, s("dup")),
            (2, 1, s("dup")),
        ]);
        assert_eq!(sheet.find_cell_by_value(1, 1, "dup"), Some((1, 3)));
    }

    #[test]
    fn find_col_by_row_and_value_scans_a_fixed_row() {
        let sheet = export_fixture();
        assert_eq!(sheet.find_col_by_row_and_value(1, 1, "Country"), Some(3));
        assert_eq!(sheet.find_col_by_row_and_value(2, 1, "Country"), None);
    }

    #[test]
    fn value_at_rejects_out_of_range_coordinates() {
        let sheet = export_fixture();
        assert!(sheet.value_at(0, 1).is_none());
        assert!(sheet.value_at(1, 0).is_none());
        assert!(sheet.value_at(99, 1).is_none());
        // A failed find chains straight through value_at
        let found = sheet.find_cell_by_value(1, 1, "missing");
        assert!(found.and_then(|(r, c)| sheet.value_at(r, c)).is_none());
    }

    #[test]
    fn values_from_row_stops_before_the_first_empty_cell() {
        let sheet = sheet(&[
            (1, 1, s("A")),
            (1, 2, s("B")),
            (1, 3, Data::Empty),
            (1, 4, s("C")),
        ]);
        let values = sheet.values_from_row(1, 1);
        assert_eq!(values, vec![s("A"), s("B")]);
    }

    #[test]
    fn values_from_row_treats_zero_as_run_end() {
        let sheet = sheet(&[
            (1, 1, s("A")),
            (1, 2, Data::Int(0)),
            (1, 3, s("B")),
        ]);
        assert_eq!(sheet.values_from_row(1, 1), vec![s("A")]);
    }

    #[test]
    fn values_from_row_reads_to_the_sheet_edge() {
        let sheet = sheet(&[(2, 2, s("X")), (2, 3, s("Y"))]);
        assert_eq!(sheet.values_from_row(2, 2), vec![s("X"), s("Y")]);
    }

    #[test]
    fn column_exists_requires_exact_header_match() {
        let sheet = export_fixture();
        assert!(sheet.column_exists("Job Title", 1));
        // No trimming on header comparison
        assert!(!sheet.column_exists("Developer", 3));
        assert!(sheet.column_exists(" Developer ", 3));
        assert!(!sheet.column_exists("Job Title", 2));
    }

    #[test]
    fn value_exists_in_column_walks_until_a_gap() {
        let sheet = sheet(&[
            (1, 1, s("Name")),
            (2, 1, s("Ana")),
            (3, 1, Data::Empty),
            (4, 1, s("Boris")),
        ]);
        assert!(sheet.value_exists_in_column(1, 1, "Ana"));
        // Below the gap is never reached
        assert!(!sheet.value_exists_in_column(1, 1, "Boris"));
        assert!(!sheet.value_exists_in_column(1, 1, "Ivan"));
    }

    #[test]
    fn counts_reflect_the_used_area() {
        let sheet = export_fixture();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 3);
    }
}

//! Read-only workbook inspection
//!
//! Loads a downloaded spreadsheet wholesale into memory and exposes
//! 1-indexed cell lookups and linear scans for test assertions. The suite
//! never writes spreadsheets; everything here is a view over what the
//! application exported.

pub mod error;
pub mod sheet;

pub use error::{WorkbookError, WorkbookResult};
pub use sheet::Sheet;

// Cell value type and its accessor trait, so callers need no direct
// calamine dependency
pub use calamine::{Data, DataType};

use std::path::Path;

use calamine::{open_workbook_auto, Reader};

/// An in-memory decoded workbook: sheet name -> cell grid.
///
/// Immutable after [`Workbook::open`]; sheets keep the file's order.
pub struct Workbook {
    sheets: Vec<(String, Sheet)>,
}

impl Workbook {
    /// Decode every sheet of the file at `path` into memory.
    pub fn open(path: impl AsRef<Path>) -> WorkbookResult<Self> {
        let mut reader = open_workbook_auto(path.as_ref())?;
        let sheets = reader
            .worksheets()
            .into_iter()
            .map(|(name, range)| (name, Sheet::from(range)))
            .collect();
        Ok(Self { sheets })
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, sheet)| sheet)
    }

    /// Sheet names in file order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(n, _)| n.as_str())
    }
}

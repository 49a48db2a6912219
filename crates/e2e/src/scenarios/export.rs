//! Export download scenarios
//!
//! The Excel checks read cell A3: with ungrouped data it holds the first
//! employee name, after grouping by Rating the export nests rows under
//! group captions and A3 becomes the first caption.

use std::path::Path;

use griddash_workbook::{DataType, Workbook};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::download::expect_download;
use crate::error::{SuiteError, SuiteResult};
use crate::runner::{ensure, ensure_eq, ScenarioCtx};
use crate::scenarios::columns;

static PDF_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Employees.*\.pdf$").unwrap());
static EXCEL_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Employees.*\.xlsx$").unwrap());

const EXPORT_SHEET: &str = "Sheet1";
const UNGROUPED_A3: &str = "Pesho";
const GROUPED_A3: &str = "Rating: 1";

pub async fn pdf_export_downloads_a_file(ctx: ScenarioCtx) -> SuiteResult<()> {
    let download = expect_download(
        &ctx.download_dir,
        ctx.config.download_timeout(),
        ctx.config.poll_interval(),
        || ctx.dashboard.click_export_pdf(),
    )
    .await?;
    ensure(
        PDF_FILE.is_match(download.file_name()),
        format!("unexpected PDF file name: {}", download.file_name()),
    )
}

pub async fn excel_export_reflects_grouping(ctx: ScenarioCtx) -> SuiteResult<()> {
    let download = expect_download(
        &ctx.download_dir,
        ctx.config.download_timeout(),
        ctx.config.poll_interval(),
        || ctx.dashboard.click_export_excel(),
    )
    .await?;
    ensure(
        EXCEL_FILE.is_match(download.file_name()),
        format!("unexpected Excel file name: {}", download.file_name()),
    )?;
    ensure_eq(
        cell_a3(download.path())?.as_deref(),
        Some(UNGROUPED_A3),
        "cell A3 before grouping",
    )?;

    ctx.dashboard
        .drag_column_to_group_panel(columns::RATING)
        .await?;

    let download = expect_download(
        &ctx.download_dir,
        ctx.config.download_timeout(),
        ctx.config.poll_interval(),
        || ctx.dashboard.click_export_excel(),
    )
    .await?;
    ensure_eq(
        cell_a3(download.path())?.as_deref(),
        Some(GROUPED_A3),
        "cell A3 after grouping",
    )
}

fn cell_a3(path: &Path) -> SuiteResult<Option<String>> {
    let workbook = Workbook::open(path)?;
    let sheet = workbook.sheet(EXPORT_SHEET).ok_or_else(|| {
        SuiteError::Assertion(format!("sheet '{EXPORT_SHEET}' missing from the export"))
    })?;
    Ok(sheet
        .value_at(3, 1)
        .and_then(|cell| cell.get_string())
        .map(str::to_string))
}

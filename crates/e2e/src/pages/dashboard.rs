//! Dashboard page object
//!
//! Selectors and operations for the admin dashboard's grid: toolbar search,
//! export buttons, the group panel that accepts dragged column headers, and
//! the pager.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::grid::{locate_row, GridPager};
use crate::pages::base::{BasePage, TypeOptions};
use crate::probe::poll;

const EXPORT_EXCEL_BUTTON: &str = "kendo-grid #exportToExcelId";
const EXPORT_PDF_BUTTON: &str = "kendo-grid #exportToPdfId";
const SEARCH_INPUT: &str = "kendo-grid-toolbar #inputId";
const GROUP_PANEL: &str = "kendo-grid-group-panel";
const ALL_ROWS: &str = "kendo-grid tr.k-table-row";
const DATA_ROWS: &str = "kendo-grid tbody tr.k-table-row";
const GROUP_HEADER_ROWS: &str = "kendo-grid tr[kendogridgroupheader]";
const GROUP_HEADER_CELLS: &str = "kendo-grid tr[kendogridgroupheader] td .k-reset";
const NO_RECORDS: &str = "kendo-grid kendo-grid-list .k-grid-norecords";
const GROUP_CHIP_REMOVE: &str = ".k-chip-remove-action";
const NEXT_PAGE_BUTTON: &str = "kendo-grid kendo-pager .k-i-caret-alt-right";
const COLUMN_HEADERS: &str = "th[role='columnheader']";
const CELLS: &str = "td, th";

/// Bound for the grid re-render after grouping or filtering.
const RENDER_TIMEOUT: Duration = Duration::from_secs(2);
/// Bound for the no-records overlay to show on an empty result set.
const EMPTY_GRID_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct DashboardPage {
    base: BasePage,
}

impl DashboardPage {
    pub fn new(page: Page, config: SuiteConfig) -> Self {
        Self {
            base: BasePage::new(page, config),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Type into the toolbar search bar.
    pub async fn search(&self, text: &str) -> SuiteResult<()> {
        self.base
            .type_into(SEARCH_INPUT, text, TypeOptions::default())
            .await
    }

    /// Clear the toolbar search bar.
    pub async fn clear_search(&self) -> SuiteResult<()> {
        self.base.clear_input(SEARCH_INPUT).await
    }

    pub async fn click_export_excel(&self) -> SuiteResult<()> {
        self.base.click(EXPORT_EXCEL_BUTTON).await
    }

    pub async fn click_export_pdf(&self) -> SuiteResult<()> {
        self.base.click(EXPORT_PDF_BUTTON).await
    }

    /// Whether the grid shows its no-records overlay.
    pub async fn is_grid_empty(&self) -> bool {
        self.base
            .probe_visible(NO_RECORDS, EMPTY_GRID_TIMEOUT)
            .await
            .map(|probe| probe.is_found())
            .unwrap_or(false)
    }

    /// Whether a further page is reachable: the next-page control must be
    /// visible and enabled.
    pub async fn has_next_page(&self) -> SuiteResult<bool> {
        if !self.base.is_visible(NEXT_PAGE_BUTTON).await {
            return Ok(false);
        }
        Ok(!self.base.is_disabled(NEXT_PAGE_BUTTON).await?)
    }

    /// Click to the next page when one is reachable.
    pub async fn next_page(&self) -> SuiteResult<()> {
        if self.has_next_page().await? {
            self.base.click(NEXT_PAGE_BUTTON).await?;
        }
        Ok(())
    }

    /// Find the row whose cells contain all of `expected`, paging forward
    /// as needed. Returns a live handle to the row, or `None`.
    pub async fn find_row(&self, expected: &[&str]) -> SuiteResult<Option<Element>> {
        if self.is_grid_empty().await {
            debug!("The grid does not contain any row");
            return Ok(None);
        }
        let max_pages = self.base.config().max_grid_pages;
        let Some(location) = locate_row(self, expected, max_pages).await? else {
            return Ok(None);
        };
        // The walk left the grid on the matching page
        let rows = self.base.page().find_elements(ALL_ROWS).await?;
        Ok(rows.into_iter().nth(location.row))
    }

    /// Whether the grid contains a row with all of `expected`.
    pub async fn has_row_values(&self, expected: &[&str]) -> SuiteResult<bool> {
        Ok(self.find_row(expected).await?.is_some())
    }

    /// Drag the header titled `column_name` onto the group panel.
    pub async fn drag_column_to_group_panel(&self, column_name: &str) -> SuiteResult<()> {
        debug!(column = column_name, "Dragging column header to the group panel");
        let anchor = self.column_header_anchor(column_name).await?;
        let panel = self.base.wait_attached(GROUP_PANEL).await?;
        self.base.drag_and_drop(&anchor, &panel).await
    }

    async fn column_header_anchor(&self, column_name: &str) -> SuiteResult<Element> {
        let timeout = self.base.config().action_timeout();
        poll(timeout, self.base.config().poll_interval(), || async {
            let headers = self.base.page().find_elements(COLUMN_HEADERS).await?;
            for header in headers {
                if let Some(text) = header.inner_text().await? {
                    if text.contains(column_name) {
                        return Ok(Some(header.find_element("a").await?));
                    }
                }
            }
            Ok(None)
        })
        .await
        .into_found()
        .ok_or_else(|| SuiteError::WaitTimeout {
            what: format!("column header '{column_name}'"),
            waited_ms: timeout.as_millis() as u64,
        })
    }

    /// Number of group header rows after grouping.
    pub async fn grouped_header_count(&self) -> SuiteResult<usize> {
        self.base
            .wait_visible(GROUP_HEADER_CELLS, RENDER_TIMEOUT)
            .await?;
        Ok(self.base.count(GROUP_HEADER_CELLS).await)
    }

    /// `aria-rowindex` of the first group header carrying `column_name`,
    /// or `None` when no such header exists.
    pub async fn grouped_header_row_index(
        &self,
        column_name: &str,
    ) -> SuiteResult<Option<String>> {
        self.base
            .wait_visible(GROUP_HEADER_CELLS, self.base.config().action_timeout())
            .await?;
        let rows = self.base.page().find_elements(GROUP_HEADER_ROWS).await?;
        for row in &rows {
            if let Ok(Some(text)) = row.inner_text().await {
                if text.contains(column_name) {
                    return Ok(row.attribute("aria-rowindex").await?);
                }
            }
        }
        Ok(None)
    }

    /// Number of data rows on the current page, headers excluded.
    pub async fn data_row_count(&self) -> SuiteResult<usize> {
        self.base.wait_visible(DATA_ROWS, RENDER_TIMEOUT).await?;
        Ok(self.base.count(DATA_ROWS).await)
    }

    /// Teardown: remove every chip from the group panel.
    pub async fn clear_group_panel(&self) -> SuiteResult<()> {
        if !self.base.is_visible(GROUP_CHIP_REMOVE).await {
            return Ok(());
        }
        let chips = self.base.count(GROUP_CHIP_REMOVE).await;
        for _ in 0..chips {
            self.base.click(GROUP_CHIP_REMOVE).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl GridPager for DashboardPage {
    async fn visible_rows(&self) -> SuiteResult<Vec<Vec<String>>> {
        self.base
            .wait_visible(ALL_ROWS, self.base.config().action_timeout())
            .await?;
        let rows = self
            .base
            .page()
            .find_elements(ALL_ROWS)
            .await
            .unwrap_or_default();
        let mut cells = Vec::with_capacity(rows.len());
        for row in &rows {
            cells.push(self.base.cell_texts(row, CELLS).await);
        }
        Ok(cells)
    }

    async fn has_next_page(&self) -> SuiteResult<bool> {
        DashboardPage::has_next_page(self).await
    }

    async fn advance_page(&self) -> SuiteResult<()> {
        self.next_page().await
    }
}

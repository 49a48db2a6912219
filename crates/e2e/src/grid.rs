//! Grid row search across pages
//!
//! The grid shows one page of rows at a time; a search for a row with given
//! cell values walks forward page by page until a match, the last page, or
//! the page cap. The walk is an explicit bounded loop so termination is
//! guaranteed even if the pager control misreports.

use async_trait::async_trait;
use tracing::debug;

use crate::error::SuiteResult;
use crate::strings::contains_all;

/// The paginated grid as seen by the row search.
#[async_trait]
pub trait GridPager {
    /// Trimmed cell texts of every row on the current page, in display
    /// order.
    async fn visible_rows(&self) -> SuiteResult<Vec<Vec<String>>>;

    /// Whether a further page can be reached: the "next" control must be
    /// both visible and enabled.
    async fn has_next_page(&self) -> SuiteResult<bool>;

    /// Advance to the next page.
    async fn advance_page(&self) -> SuiteResult<()>;
}

/// Where a matching row was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    /// Pages advanced from the page the search started on.
    pub page: usize,
    /// Zero-based row index within that page.
    pub row: usize,
}

/// Find the first row whose cells contain all of `expected`
/// (order-independent; the row may have more cells than `expected`).
///
/// Returns `Ok(None)` when the grid is empty, the pages are exhausted, or
/// `max_pages` pages have been examined.
pub async fn locate_row<P>(
    pager: &P,
    expected: &[&str],
    max_pages: usize,
) -> SuiteResult<Option<RowLocation>>
where
    P: GridPager + ?Sized,
{
    for page in 0..max_pages {
        let rows = pager.visible_rows().await?;
        if rows.is_empty() {
            debug!(page, "The grid does not contain any row");
            return Ok(None);
        }
        for (row, cells) in rows.iter().enumerate() {
            if contains_all(cells, expected) {
                return Ok(Some(RowLocation { page, row }));
            }
        }
        if !pager.has_next_page().await? {
            return Ok(None);
        }
        if page + 1 < max_pages {
            pager.advance_page().await?;
        }
    }
    debug!(max_pages, "Row search stopped at the page cap");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeGrid {
        pages: Vec<Vec<Vec<String>>>,
        current: Mutex<usize>,
        advances: Mutex<usize>,
        endless: bool,
    }

    impl FakeGrid {
        fn new(pages: &[&[&[&str]]]) -> Self {
            let pages = pages
                .iter()
                .map(|rows| {
                    rows.iter()
                        .map(|cells| cells.iter().map(|c| c.to_string()).collect())
                        .collect()
                })
                .collect();
            Self {
                pages,
                current: Mutex::new(0),
                advances: Mutex::new(0),
                endless: false,
            }
        }

        fn advances(&self) -> usize {
            *self.advances.lock().unwrap()
        }
    }

    #[async_trait]
    impl GridPager for FakeGrid {
        async fn visible_rows(&self) -> SuiteResult<Vec<Vec<String>>> {
            let current = *self.current.lock().unwrap();
            Ok(self.pages[current % self.pages.len()].clone())
        }

        async fn has_next_page(&self) -> SuiteResult<bool> {
            if self.endless {
                return Ok(true);
            }
            Ok(*self.current.lock().unwrap() + 1 < self.pages.len())
        }

        async fn advance_page(&self) -> SuiteResult<()> {
            *self.current.lock().unwrap() += 1;
            *self.advances.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_grid_reports_no_match_without_paging() {
        let grid = FakeGrid::new(&[&[]]);
        let found = locate_row(&grid, &["anything"], 8).await.unwrap();
        assert_eq!(found, None);
        assert_eq!(grid.advances(), 0);
    }

    #[tokio::test]
    async fn match_on_the_first_page() {
        let grid = FakeGrid::new(&[&[
            &["Ana", "Designer"],
            &["Boiko", "Account Executive", "Sofia"],
        ]]);
        let found = locate_row(&grid, &["Account Executive", "Boiko"], 8)
            .await
            .unwrap();
        assert_eq!(found, Some(RowLocation { page: 0, row: 1 }));
        assert_eq!(grid.advances(), 0);
    }

    #[tokio::test]
    async fn advances_exactly_one_page_for_a_match_on_page_two() {
        let grid = FakeGrid::new(&[
            &[&["Ana", "Designer"]],
            &[&["Boiko", "Account Executive"]],
        ]);
        let found = locate_row(&grid, &["Boiko"], 8).await.unwrap();
        assert_eq!(found, Some(RowLocation { page: 1, row: 0 }));
        assert_eq!(grid.advances(), 1);
    }

    #[tokio::test]
    async fn exhausts_every_page_before_giving_up() {
        let grid = FakeGrid::new(&[
            &[&["Ana"]],
            &[&["Boiko"]],
            &[&["Vera"]],
        ]);
        let found = locate_row(&grid, &["Ivan"], 8).await.unwrap();
        assert_eq!(found, None);
        assert_eq!(grid.advances(), 2);
    }

    #[tokio::test]
    async fn shorter_rows_never_match() {
        let grid = FakeGrid::new(&[&[&["Ana"]]]);
        let found = locate_row(&grid, &["Ana", "Designer"], 8).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn page_cap_bounds_a_lying_pager() {
        let mut grid = FakeGrid::new(&[&[&["Ana"]]]);
        grid.endless = true;
        let found = locate_row(&grid, &["Ivan"], 3).await.unwrap();
        assert_eq!(found, None);
        assert_eq!(grid.advances(), 2);
    }
}

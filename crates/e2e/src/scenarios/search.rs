//! Search bar scenarios

use crate::error::SuiteResult;
use crate::runner::{ensure, ensure_eq, ScenarioCtx};

const ADDRESS_FRAGMENT: &str = "Ovcha Ku";

/// Cells of the single row left after filtering by the address fragment.
const FILTERED_ROW: &[&str] = &[
    "Boiko Borisov",
    "Account Executive",
    "Offline",
    "51%",
    "$76,354.00",
    "(304) 6324519",
    "Ovcha Kupel, Sofia",
];

pub async fn search_filters_to_a_unique_row(ctx: ScenarioCtx) -> SuiteResult<()> {
    ctx.dashboard.search(ADDRESS_FRAGMENT).await?;
    ensure(
        ctx.dashboard.has_row_values(FILTERED_ROW).await?,
        "the expected result is not shown in the grid",
    )?;
    let results = ctx.dashboard.data_row_count().await?;
    ensure_eq(results, 1, "filtered data rows")?;
    // Leave the grid unfiltered for whatever runs next
    ctx.dashboard.clear_search().await?;
    Ok(())
}

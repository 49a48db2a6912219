//! Drag-and-drop grouping scenarios

use crate::error::SuiteResult;
use crate::runner::{ensure_eq, ScenarioCtx};
use crate::scenarios::columns;

pub async fn single_column_groups_rows(ctx: ScenarioCtx) -> SuiteResult<()> {
    ctx.dashboard
        .drag_column_to_group_panel(columns::JOB_TITLE)
        .await?;
    ensure_eq(
        ctx.dashboard.grouped_header_count().await?,
        17,
        "grouped header rows",
    )?;
    let index = ctx
        .dashboard
        .grouped_header_row_index(columns::JOB_TITLE)
        .await?;
    ensure_eq(index.as_deref(), Some("3"), "grouped header row index")?;
    Ok(())
}

pub async fn stacked_columns_nest_in_drag_order(ctx: ScenarioCtx) -> SuiteResult<()> {
    for column in [columns::CONTACT_NAME, columns::COUNTRY, columns::ENGAGEMENT] {
        ctx.dashboard.drag_column_to_group_panel(column).await?;
    }
    for (column, expected) in [
        (columns::CONTACT_NAME, "3"),
        (columns::COUNTRY, "4"),
        (columns::ENGAGEMENT, "5"),
    ] {
        let index = ctx.dashboard.grouped_header_row_index(column).await?;
        ensure_eq(
            index.as_deref(),
            Some(expected),
            &format!("'{column}' header row index"),
        )?;
    }
    Ok(())
}

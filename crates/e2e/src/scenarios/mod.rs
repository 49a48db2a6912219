//! Scenario registry
//!
//! The demo ships fixed data, so the expectations below (grouped row
//! counts, the filtered address row, exported cell values) are stable
//! across runs.

pub mod export;
pub mod grouping;
pub mod search;

use crate::runner::Scenario;

/// Column titles of the demo grid.
pub mod columns {
    pub const CONTACT_NAME: &str = "Contact Name";
    pub const JOB_TITLE: &str = "Job Title";
    pub const COUNTRY: &str = "Country";
    pub const ENGAGEMENT: &str = "Engagement";
    pub const RATING: &str = "Rating";
}

/// Every scenario, in execution order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "one dragged column reorders the grid structure",
            tags: &["grouping"],
            run: |ctx| Box::pin(grouping::single_column_groups_rows(ctx)),
        },
        Scenario {
            name: "each additional dragged column nests as a child row",
            tags: &["grouping"],
            run: |ctx| Box::pin(grouping::stacked_columns_nest_in_drag_order(ctx)),
        },
        Scenario {
            name: "the search bar filters unique by partial address",
            tags: &["search"],
            run: |ctx| Box::pin(search::search_filters_to_a_unique_row(ctx)),
        },
        Scenario {
            name: "export to PDF downloads a file",
            tags: &["download"],
            run: |ctx| Box::pin(export::pdf_export_downloads_a_file(ctx)),
        },
        Scenario {
            name: "drag and drop updates the exported Excel structure",
            tags: &["download", "grouping"],
            run: |ctx| Box::pin(export::excel_export_reflects_grouping(ctx)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_names_are_unique() {
        let scenarios = all();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn every_scenario_is_tagged() {
        assert!(all().iter().all(|s| !s.tags.is_empty()));
    }
}

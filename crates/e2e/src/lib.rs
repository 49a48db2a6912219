//! GridDash E2E Test Suite
//!
//! This crate drives a real Chromium instance over the Chrome DevTools
//! Protocol to exercise the GridDash admin dashboard: grid search, column
//! drag-to-group, pagination, and the Excel/PDF export buttons. Downloaded
//! exports are decoded and asserted on with `griddash-workbook`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Scenario Runner (Rust)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SuiteRunner                                                │
//! │    ├── Session::launch() -> headless Chromium + CDP loop    │
//! │    ├── Session::open_dashboard() -> DashboardPage           │
//! │    ├── run(scenarios) -> SuiteSummary (JSON report)         │
//! │    └── screenshot-on-failure, one run-level retry           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DashboardPage (page object)                                │
//! │    ├── search / export buttons / group-panel teardown       │
//! │    ├── GridPager: visible_rows, has_next_page, advance      │
//! │    └── find_row -> locate_row (bounded page walk)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BasePage: tri-state probes, waits, clicks, typing,         │
//! │            drag gesture, download capture                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod grid;
pub mod pages;
pub mod probe;
pub mod runner;
pub mod scenarios;
pub mod session;
pub mod strings;

pub use config::SuiteConfig;
pub use error::{SuiteError, SuiteResult};
pub use runner::{Scenario, SuiteRunner, SuiteSummary};
pub use session::Session;

//! Page objects over the CDP page handle

pub mod base;
pub mod dashboard;

pub use base::{BasePage, TypeOptions};
pub use dashboard::DashboardPage;

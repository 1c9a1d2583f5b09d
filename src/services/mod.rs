//! Service layer for business logic
//!
//! Link operations are defined once here and shared by every command.

pub mod dashboard;
mod link_service;
pub mod link_view;

pub use dashboard::{DashboardStats, MonthlyBucket};
pub use link_service::*;
pub use link_view::{LinkPage, LinkQuery, SortKey, short_url};

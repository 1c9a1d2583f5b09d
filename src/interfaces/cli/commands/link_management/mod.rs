//! Link management commands
//!
//! This module provides CLI commands for managing short links.

mod check;
mod create;
mod delete;
mod helpers;
mod list;
mod show;
mod stats;
mod update;

pub use check::check_alias;
pub use create::create_link;
pub use delete::delete_link;
pub use list::list_links;
pub use show::show_link;
pub use stats::show_stats;
pub use update::update_link;

//! linkdash - manage short links from the terminal
//!
//! Links live in a remote table (a hosted REST table, a SQL database, or an
//! in-process map for tests). The core owns the alias protocol: generate or
//! validate an alias, pre-check that it is free, write, and turn a
//! unique-constraint failure at write time into the same duplicate-alias error
//! the pre-check reports.
//!
//! # Architecture
//! - `storage`: the [`storage::LinkTable`] seam and its backends
//! - `session`: who the current user is
//! - `services`: link operations, dashboard statistics, list views
//! - `interfaces`: the command-line front end
//! - `config`: static configuration
//! - `system`: logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod session;
pub mod storage;
pub mod system;
pub mod utils;

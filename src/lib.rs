//! hiitfit - Exercise history tracker
//!
//! Keeps a newest-first ledger of the exercises completed each day and
//! persists it to a versioned TOML file after every change.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::HiitError;

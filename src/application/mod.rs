//! Application layer - Use cases and orchestration

pub mod history_store;
pub mod manage_config;
pub mod record;

pub use history_store::HistoryStore;
pub use manage_config::ConfigService;
pub use record::{open_store, record_done, record_on, remove_on};

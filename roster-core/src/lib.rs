pub mod config;

pub use config::{AlertConfig, Config, PaginationMode};

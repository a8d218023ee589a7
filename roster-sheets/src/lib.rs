pub mod auth;
pub mod client;

pub use auth::{AccessToken, ServiceAccountKey};
pub use client::{SheetsClient, UpdateValuesResponse};

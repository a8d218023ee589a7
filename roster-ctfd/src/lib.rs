pub mod client;
pub mod impls;
pub mod model;
#[cfg(test)]
mod test_support;

pub use client::CtfdClient;
pub use model::user::{UserId, UserRecord};

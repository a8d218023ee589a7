pub mod user;
pub mod wire;

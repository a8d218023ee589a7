pub mod user_detail;
pub mod users;

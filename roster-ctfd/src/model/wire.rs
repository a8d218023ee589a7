//! Response bodies of the CTFd user endpoints.

use serde::Deserialize;
use serde_json::Value;

/// `GET /api/v1/users`
#[derive(Clone, Debug, Deserialize)]
pub struct UserListResponse {
    pub data: Vec<UserSummary>,
    pub meta: ListMeta,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserSummary {
    pub id: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListMeta {
    pub pagination: Pagination,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Pagination {
    /// Cursor for the following page; `null` on the last one.
    #[serde(default)]
    pub next: Option<Value>,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// `GET /api/v1/users/{id}`
#[derive(Clone, Debug, Deserialize)]
pub struct UserDetailResponse {
    pub data: UserDetail,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fields: Vec<UserField>,
}

/// A custom registration field answered by the user. Values stay raw JSON
/// because CTFd fields may be booleans or numbers.
#[derive(Clone, Debug, Deserialize)]
pub struct UserField {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

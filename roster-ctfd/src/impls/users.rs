use std::future::Future;

use anyhow::Context as _;
use roster_core::PaginationMode;
use tracing::{debug, warn};

use crate::client::CtfdClient;
use crate::model::user::UserId;
use crate::model::wire::UserListResponse;

pub const USERS_PATH: &str = "/api/v1/users";

/// Where listing pages come from. `page` is `None` for the unparameterised
/// first-page request.
pub trait UserPageSource {
    fn fetch_user_page(
        &self,
        page: Option<u64>,
    ) -> impl Future<Output = anyhow::Result<UserListResponse>> + Send;
}

impl UserPageSource for CtfdClient {
    async fn fetch_user_page(&self, page: Option<u64>) -> anyhow::Result<UserListResponse> {
        let query: Vec<(&str, String)> = page
            .map(|page| vec![("page", page.to_string())])
            .unwrap_or_default();

        self.get_json(USERS_PATH, &query).await
    }
}

/// Cursor over the listing endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u64,
    pub has_next: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            has_next: true,
        }
    }
}

impl PaginationState {
    /// Page parameter to send for the current page under `mode`.
    pub fn request_page(&self, mode: PaginationMode) -> Option<u64> {
        match mode {
            PaginationMode::FirstPage => None,
            PaginationMode::Follow => (self.page > 1).then_some(self.page),
        }
    }
}

/// Collect the ids of every user the token can see. Hidden and banned
/// accounts are already filtered out by CTFd.
///
/// In [`PaginationMode::FirstPage`] the page counter advances but every
/// request still targets the first page, so the loop only ends when that
/// page reports no further cursor.
pub async fn list_user_ids<S>(source: &S, mode: PaginationMode) -> anyhow::Result<Vec<UserId>>
where
    S: UserPageSource,
{
    let mut user_ids = Vec::new();
    let mut state = PaginationState::default();

    while state.has_next {
        if mode == PaginationMode::FirstPage && state.page == 2 {
            warn!(
                "user listing reports more pages but requests are not paginated; \
                 set CTFD_FOLLOW_PAGINATION=true to follow them"
            );
        }

        let response = source
            .fetch_user_page(state.request_page(mode))
            .await
            .with_context(|| format!("failed to fetch user listing page {}", state.page))?;

        debug!(
            page = state.page,
            users = response.data.len(),
            has_next = response.meta.pagination.has_next(),
            "fetched user listing page"
        );

        user_ids.extend(response.data.iter().map(|user| user.id));
        state.has_next = response.meta.pagination.has_next();
        if state.has_next {
            state.page += 1;
        }
    }

    Ok(user_ids)
}

use anyhow::Context as _;

use crate::client::CtfdClient;
use crate::model::user::{UserId, UserRecord};
use crate::model::wire::UserDetailResponse;

pub fn user_path(user_id: UserId) -> String {
    format!("/api/v1/users/{}", user_id)
}

pub async fn get_user_record(client: &CtfdClient, user_id: UserId) -> anyhow::Result<UserRecord> {
    let response: UserDetailResponse = client.get_json(&user_path(user_id), &[]).await?;
    UserRecord::try_from(response.data)
}

/// Fetch every user's record in listing order. The first failure aborts the
/// whole batch.
pub async fn get_user_records(
    client: &CtfdClient,
    user_ids: &[UserId],
) -> anyhow::Result<Vec<UserRecord>> {
    let mut records = Vec::with_capacity(user_ids.len());
    for &user_id in user_ids {
        let record = get_user_record(client, user_id)
            .await
            .with_context(|| format!("Error getting user data for user {user_id}"))?;
        records.push(record);
    }

    Ok(records)
}

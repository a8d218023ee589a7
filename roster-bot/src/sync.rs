use anyhow::Context as _;
use tracing::info;

use roster_core::Config;
use roster_ctfd::CtfdClient;
use roster_ctfd::UserRecord;
use roster_ctfd::impls::user_detail::get_user_records;
use roster_ctfd::impls::users::list_user_ids;
use roster_sheets::client::SHEETS_API_BASE;
use roster_sheets::{ServiceAccountKey, SheetsClient};

#[derive(Clone, Copy, Debug)]
pub struct SyncSummary {
    pub rows_written: usize,
}

/// List users, fetch their details, then overwrite the sheet range.
/// Any failure aborts the run before the sheet is touched. The key file is
/// read up front, but the access token is only requested right before the
/// write so a long enumeration cannot outlive it.
pub async fn run(config: &Config) -> anyhow::Result<SyncSummary> {
    sync_to(config, SHEETS_API_BASE).await
}

async fn sync_to(config: &Config, sheets_api_base: &str) -> anyhow::Result<SyncSummary> {
    info!(
        ctfd_url = %config.ctfd_url,
        sheet_range = %config.sheet_range,
        pagination = ?config.pagination,
        "Starting roster sync."
    );

    let key = ServiceAccountKey::from_file(&config.service_account_file)?;
    let ctfd = CtfdClient::new(&config.ctfd_url, &config.ctfd_token);

    let user_ids = list_user_ids(&ctfd, config.pagination)
        .await
        .context("Error getting users")?;
    let records = get_user_records(&ctfd, &user_ids).await?;
    info!("Number of users: {}", records.len());

    let rows: Vec<Vec<String>> = records.into_iter().map(UserRecord::into_row).collect();
    let sheets = SheetsClient::connect(&key)
        .await?
        .with_api_base(sheets_api_base);
    sheets
        .update_values(&config.spreadsheet_id, &config.sheet_range, &rows)
        .await
        .context("Error updating sheet")?;

    Ok(SyncSummary {
        rows_written: rows.len(),
    })
}

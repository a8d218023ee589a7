use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::ServiceAccountKey;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Request body of `spreadsheets.values.update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange<'a> {
    pub range: &'a str,
    pub major_dimension: &'static str,
    pub values: &'a [Vec<String>],
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

/// Google Sheets client authorised with a service-account access token.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: SHEETS_API_BASE.to_owned(),
            access_token: access_token.into(),
        }
    }

    /// Exchange the service-account key for a token and build a client.
    pub async fn connect(key: &ServiceAccountKey) -> anyhow::Result<Self> {
        let http = reqwest::Client::new();
        let token = key
            .fetch_access_token(&http)
            .await
            .context("Unable to retrieve Sheets client")?;

        Ok(Self::new(http, token.access_token))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.api_base,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    /// Overwrite `range` with `rows`, one call, values stored as-is.
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> anyhow::Result<UpdateValuesResponse> {
        let url = self.values_url(spreadsheet_id, range);
        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values: rows,
        };
        debug!(%range, rows = rows.len(), "updating sheet values");

        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .context("sheet update request failed")?;

        let status = response.status();
        let payload = response
            .bytes()
            .await
            .context("failed to read sheet update response")?;

        if !status.is_success() {
            bail!(
                "Sheets API returned {status}: {}",
                String::from_utf8_lossy(&payload).trim()
            );
        }

        let summary: UpdateValuesResponse = if payload.is_empty() {
            UpdateValuesResponse::default()
        } else {
            serde_json::from_slice(&payload).context("failed to decode sheet update response")?
        };

        info!(
            updated_range = summary.updated_range.as_deref().unwrap_or(range),
            updated_rows = summary.updated_rows.unwrap_or(0),
            updated_cells = summary.updated_cells.unwrap_or(0),
            "sheet updated"
        );

        Ok(summary)
    }
}

use std::env;
use std::path::PathBuf;

use anyhow::bail;
use roster_utils::parse::{non_empty, parse_bool_flag, trim_base_url};

pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service-account.json";
pub const DEFAULT_SHEET_RANGE: &str = "STAGING!A2:J";

/// How the user lister moves between listing pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaginationMode {
    /// Every request targets the first page; the loop ends once that page
    /// reports no `next` cursor.
    #[default]
    FirstPage,
    /// Pages after the first are requested with `?page=N`.
    Follow,
}

/// Settings needed to report a failure. Loading never fails, so alerts stay
/// possible even when the rest of the configuration is broken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertConfig {
    pub webhook_url: Option<String>,
    pub ping_id: Option<String>,
}

impl AlertConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            webhook_url: non_empty(lookup("DISCORD_WEBHOOK")),
            ping_id: non_empty(lookup("DISCORD_ID_TO_PING")),
        }
    }
}

/// Everything the sync run needs, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub spreadsheet_id: String,
    pub ctfd_url: String,
    pub ctfd_token: String,
    pub sheet_range: String,
    pub service_account_file: PathBuf,
    pub pagination: PaginationMode,
    pub alert: AlertConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> anyhow::Result<String> {
            match non_empty(lookup(key)) {
                Some(value) => Ok(value),
                None => bail!("{key} is not set"),
            }
        };

        let spreadsheet_id = required("SPREADSHEET_ID")?;
        let ctfd_token = required("CTFD_TOKEN")?;
        let ctfd_url = trim_base_url(&required("CTFD_URL")?);

        let sheet_range = non_empty(lookup("SHEET_RANGE"))
            .unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_owned());
        let service_account_file = non_empty(lookup("GOOGLE_SERVICE_ACCOUNT_FILE"))
            .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT_FILE.to_owned())
            .into();

        let pagination = match non_empty(lookup("CTFD_FOLLOW_PAGINATION")) {
            None => PaginationMode::FirstPage,
            Some(raw) => match parse_bool_flag(&raw) {
                Some(true) => PaginationMode::Follow,
                Some(false) => PaginationMode::FirstPage,
                None => bail!("CTFD_FOLLOW_PAGINATION has an invalid value `{raw}`"),
            },
        };

        Ok(Self {
            spreadsheet_id,
            ctfd_url,
            ctfd_token,
            sheet_range,
            service_account_file,
            pagination,
            alert: AlertConfig::from_lookup(&lookup),
        })
    }
}

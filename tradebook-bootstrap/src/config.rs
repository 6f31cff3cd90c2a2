use chrono::{FixedOffset, NaiveDate};
use thiserror::Error;
use tradebook_connector::exchange::binance::{
    spot::HTTP_BASE_URL_BINANCE_SPOT, thailand::HTTP_BASE_URL_BINANCE_TH, Credentials,
};
use tradebook_model::ledger::DateSpan;

/// Asia/Bangkok, which observes no daylight saving.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidVar { name: &'static str, value: String },
}

/// Process wide settings, read once at start and passed explicitly into each client.
///
/// Credentials resolve per pipeline, so a missing pair only fails the report that needs it.
#[derive(Clone, Debug)]
pub struct Config {
    pub fills_credentials: Result<Credentials, ConfigError>,
    pub orders_credentials: Result<Credentials, ConfigError>,
    pub binance_base_url: String,
    pub binance_th_base_url: String,
    pub utc_offset: FixedOffset,
    pub report_from: Option<NaiveDate>,
    pub report_to: Option<NaiveDate>,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let fills_credentials = credentials(
            (var("API_KEY"), "API_KEY"),
            (var("API_SECRET"), "API_SECRET"),
        );

        // Each orders variable falls back to its fills counterpart on its own
        let orders_credentials = credentials(
            (var("API_KEY_USDTTHB").or_else(|| var("API_KEY")), "API_KEY_USDTTHB"),
            (var("API_SECRET_USDTTHB").or_else(|| var("API_SECRET")), "API_SECRET_USDTTHB"),
        );

        let utc_offset = match var("REPORT_UTC_OFFSET_HOURS") {
            None => hours_offset(DEFAULT_UTC_OFFSET_HOURS),
            Some(value) => value.trim().parse::<i32>().ok().and_then(hours_offset),
        }
        .ok_or_else(|| ConfigError::InvalidVar {
            name: "REPORT_UTC_OFFSET_HOURS",
            value: var("REPORT_UTC_OFFSET_HOURS").unwrap_or_default(),
        })?;

        let date = |name: &'static str| {
            var(name)
                .map(|value| {
                    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                        .map_err(|_| ConfigError::InvalidVar { name, value })
                })
                .transpose()
        };

        Ok(Self {
            fills_credentials,
            orders_credentials,
            binance_base_url: var("BINANCE_BASE_URL").unwrap_or_else(|| HTTP_BASE_URL_BINANCE_SPOT.to_string()),
            binance_th_base_url: var("BINANCE_TH_BASE_URL").unwrap_or_else(|| HTTP_BASE_URL_BINANCE_TH.to_string()),
            utc_offset,
            report_from: date("REPORT_FROM")?,
            report_to: date("REPORT_TO")?,
        })
    }

    /// Display range for a dataset spanning `span`. Unset bounds default to the data's own.
    pub fn display_range(&self, span: DateSpan) -> DateSpan {
        DateSpan::new(
            self.report_from.unwrap_or(span.start),
            self.report_to.unwrap_or(span.end),
        )
    }
}

fn credentials(
    (key, key_name): (Option<String>, &'static str),
    (secret, secret_name): (Option<String>, &'static str),
) -> Result<Credentials, ConfigError> {
    Ok(Credentials::new(
        key.ok_or(ConfigError::MissingVar(key_name))?,
        secret.ok_or(ConfigError::MissingVar(secret_name))?,
    ))
}

fn hours_offset(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

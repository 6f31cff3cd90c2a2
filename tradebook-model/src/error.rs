use thiserror::Error;

use crate::enums::PipelineKind;

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("Deserializing JSON error: {error} for payload: {payload}")]
    DeserializingJson {
        error: String,
        payload: String,
    },

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP request timed out")]
    HttpTimeout(reqwest::Error),

    /// REST http response error
    #[error("HTTP response (status={0}) error: {1}")]
    HttpResponse(reqwest::StatusCode, String),

    #[error("consumed error message from exchange: {0}")]
    Exchange(String),

    #[error("request signing error: {0}")]
    Signing(String),
}

impl From<reqwest::Error> for SocketError {
    fn from(error: reqwest::Error) -> Self {
        match error {
            error if error.is_timeout() => SocketError::HttpTimeout(error),
            error => SocketError::Http(error),
        }
    }
}

/// Failure of a single reporting pipeline. Each pipeline is its own fault domain, so
/// one of these never prevents the other pipeline from rendering.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("malformed record: field {field} has unparseable value {value:?}")]
    MalformedRecord { field: &'static str, value: String },

    #[error("no {0} history available")]
    NoData(PipelineKind),

    #[error("transport failure: {0}")]
    Transport(#[from] SocketError),

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("live quote unavailable: {0}")]
    MissingQuote(String),

    #[error("Failed to build struct due to missing attributes: {0}")]
    BuilderIncomplete(&'static str),
}

impl ReportError {
    pub fn malformed<V>(field: &'static str, value: V) -> Self
    where
        V: Into<String>,
    {
        ReportError::MalformedRecord {
            field,
            value: value.into(),
        }
    }

    /// Determine if the error is an empty state to be shown as information rather than
    /// as a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, ReportError::NoData(_))
    }
}

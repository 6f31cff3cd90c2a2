use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::error;
use tradebook_model::error::SocketError;

/// Parses Http responses of one API into its success type, or into an [`Self::OutputError`]
/// for non-success statuses.
pub trait HttpParser {
    type ApiError: DeserializeOwned;
    type OutputError: From<SocketError>;

    /// Attempt to parse a [`StatusCode`] & bytes payload into a deserialisable `Response`.
    ///
    /// Any non-success status is a failure regardless of the payload. The payload is decoded
    /// as [`Self::ApiError`] when possible, otherwise the raw body is kept.
    fn parse<Response>(&self, status: StatusCode, payload: &[u8]) -> Result<Response, Self::OutputError>
    where
        Response: DeserializeOwned,
    {
        if !status.is_success() {
            let body = String::from_utf8_lossy(payload).into_owned();
            error!(status_code = ?status, response_body = %body, "http request failed");

            return Err(match serde_json::from_slice::<Self::ApiError>(payload) {
                Ok(api_error) => self.parse_api_error(status, api_error),
                Err(_) => Self::OutputError::from(SocketError::HttpResponse(status, body)),
            });
        }

        serde_json::from_slice::<Response>(payload).map_err(|serde_error| {
            let payload = String::from_utf8_lossy(payload).into_owned();
            error!(
                status_code = ?status,
                ?serde_error,
                response_body = %payload,
                "error deserializing HTTP response"
            );

            Self::OutputError::from(SocketError::DeserializingJson {
                error: serde_error.to_string(),
                payload,
            })
        })
    }

    /// If [`parse`](Self::parse) fails for a non-success status, the payload is deserialised
    /// into an [`Self::ApiError`] and mapped into an [`Self::OutputError`] here.
    fn parse_api_error(&self, status: StatusCode, error: Self::ApiError) -> Self::OutputError;
}

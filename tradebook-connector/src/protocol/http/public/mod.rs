use reqwest::header::ACCEPT;
use tradebook_model::error::SocketError;

use super::{builder::HttpRequestBuilder, rest::request::RestRequest};

/// [`RestRequest`] build strategy for non-authenticated endpoints, eg/ market tickers.
#[derive(Debug, Copy, Clone, Default)]
pub struct PublicNoAuth;

impl HttpRequestBuilder for PublicNoAuth {
    fn build<Request>(&self, _: Request, builder: reqwest::RequestBuilder) -> Result<reqwest::Request, SocketError>
    where
        Request: RestRequest,
    {
        builder
            .header(ACCEPT, "application/json")
            .build()
            .map_err(SocketError::from)
    }
}

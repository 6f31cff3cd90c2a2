use std::{borrow::Cow, time::Instant};

use bytes::Bytes;
use reqwest::StatusCode;
use tracing::debug;
use tradebook_model::error::SocketError;

use crate::protocol::http::{builder::HttpRequestBuilder, parser::HttpParser};

use super::request::RestRequest;

/// Configurable REST client capable of executing signed [`RestRequest`]s. Use this when
/// integrating APIs that require Http in order to interact with resources. Each API will
/// require a specific combination of [`HttpRequestBuilder`] & [`HttpParser`].
#[derive(Debug)]
pub struct RestClient<Strategy, Parser> {
    /// HTTP [`reqwest::Client`] for executing signed [`reqwest::Request`]s.
    pub http_client: reqwest::Client,

    /// Base Url of the API being interacted with.
    pub base_url: Cow<'static, str>,

    /// [`RestRequest`] build strategy for the API being interacted with that implements
    /// [`HttpRequestBuilder`].
    ///
    /// An authenticated API would use a [`RequestSigner`](crate::protocol::http::private::RequestSigner),
    /// a public one [`PublicNoAuth`](crate::protocol::http::public::PublicNoAuth).
    pub strategy: Strategy,

    /// [`HttpParser`] that deserialises [`RestRequest::Response`]s, and upon failure parses
    /// API errors returned from the server.
    pub parser: Parser,
}

impl<Strategy, Parser> RestClient<Strategy, Parser>
where
    Strategy: HttpRequestBuilder,
    Parser: HttpParser,
{
    /// Execute the provided [`RestRequest`].
    pub async fn execute<Request>(
        &self,
        request: Request,
    ) -> Result<(StatusCode, Request::Response), Parser::OutputError>
    where
        Request: RestRequest,
    {
        // Use provided Request to construct a signed reqwest::Request
        let request = self.build(request)?;

        // Measure request execution
        let (status, payload) = self.measured_execution(request).await?;

        // Attempt to parse API Success or Error response
        self.parser
            .parse::<Request::Response>(status, &payload)
            .map(|response| (status, response))
    }

    /// Use the provided [`RestRequest`] to construct a signed Http [`reqwest::Request`].
    pub fn build<Request>(&self, request: Request) -> Result<reqwest::Request, SocketError>
    where
        Request: RestRequest,
    {
        // Construct url
        let url = format!("{}{}", self.base_url, request.path());

        // Construct RequestBuilder with method & url
        let mut builder = self
            .http_client
            .request(Request::method(), url)
            .timeout(Request::timeout());

        // Add optional query parameters
        if let Some(query) = request.query_params() {
            builder = builder.query(query);
        }

        // Add optional Body
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        // Use RequestBuilder (public or private strategy) to build reqwest::Request
        self.strategy.build(request, builder)
    }

    /// Execute the built [`reqwest::Request`] using the [`reqwest::Client`], logging the
    /// round trip latency.
    pub async fn measured_execution(
        &self,
        request: reqwest::Request,
    ) -> Result<(StatusCode, Bytes), SocketError> {
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        let start = Instant::now();
        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let payload = response.bytes().await?;

        debug!(
            %method,
            %path,
            %status,
            latency_ms = start.elapsed().as_millis() as u64,
            bytes = payload.len(),
            "executed http request"
        );

        Ok((status, payload))
    }
}

impl<Strategy, Parser> RestClient<Strategy, Parser> {
    /// Construct a new [`Self`] using the provided configuration.
    pub fn new<Url>(base_url: Url, strategy: Strategy, parser: Parser) -> Self
    where
        Url: Into<Cow<'static, str>>,
    {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            strategy,
            parser,
        }
    }
}

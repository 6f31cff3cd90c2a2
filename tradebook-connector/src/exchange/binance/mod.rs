use std::{
    borrow::Cow,
    fmt::{self, Debug},
};

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tradebook_macro::AsUrlParams;
use tradebook_model::{error::SocketError, instruments::Instrument};

use crate::protocol::http::{
    parser::HttpParser,
    private::{encoder::HexEncoder, RequestSigner, Signer},
    public::PublicNoAuth,
    rest::{
        client::RestClient,
        request::{AsUrlParams, RestRequest},
    },
};

pub mod spot;
pub mod thailand;

/// Header carrying the account API key on every authenticated Binance request.
pub const HEADER_API_KEY: &str = "X-MBX-APIKEY";

pub type BinanceSignedClient = RestClient<RequestSigner<BinanceSigner, Hmac<Sha256>, HexEncoder>, BinanceParser>;
pub type BinancePublicClient = RestClient<PublicNoAuth, BinanceParser>;

/// API key pair of one Binance account. The secret is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new<S>(api_key: S, api_secret: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Signs `SIGNED` Binance endpoints: HMAC-SHA256 over the exact query string, hex encoded,
/// appended as the final `signature` parameter.
#[derive(Debug, Clone)]
pub struct BinanceSigner {
    api_key: String,
}

impl BinanceSigner {
    pub fn new<S>(api_key: S) -> Self
    where
        S: Into<String>,
    {
        Self { api_key: api_key.into() }
    }
}

/// Configuration required to sign every Binance `RestRequest`.
#[derive(Debug)]
pub struct BinanceSignConfig<'a> {
    api_key: &'a str,
    query_params: Cow<'static, str>,
}

impl Signer for BinanceSigner {
    type Config<'a> = BinanceSignConfig<'a> where Self: 'a;

    fn config<'a, Request>(
        &'a self,
        request: Request,
        _: &reqwest::RequestBuilder,
    ) -> Result<Self::Config<'a>, SocketError>
    where
        Request: RestRequest,
    {
        let query_params = request
            .query_params()
            .map_or(Cow::Borrowed(""), |params| Cow::Owned(params.to_url_params()));

        Ok(BinanceSignConfig {
            api_key: self.api_key.as_str(),
            query_params,
        })
    }

    fn add_bytes_to_sign<M>(mac: &mut M, config: &Self::Config<'_>)
    where
        M: Mac,
    {
        mac.update(config.query_params.as_bytes());
    }

    fn build_signed_request(
        config: Self::Config<'_>,
        builder: reqwest::RequestBuilder,
        signature: String,
    ) -> Result<reqwest::Request, SocketError> {
        builder
            .header(HEADER_API_KEY, config.api_key)
            .query(&[("signature", &signature)])
            .build()
            .map_err(SocketError::from)
    }
}

/// Binance error payload, eg/ `{"code":-2015,"msg":"Invalid API-key, IP, or permissions for action."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct BinanceParser;

impl HttpParser for BinanceParser {
    type ApiError = BinanceApiError;
    type OutputError = SocketError;

    fn parse_api_error(&self, status: StatusCode, api_error: Self::ApiError) -> Self::OutputError {
        SocketError::HttpResponse(status, format!("code {}: {}", api_error.code, api_error.msg))
    }
}

/// Query of every `SIGNED` endpoint used here. Field order is the signed byte order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, AsUrlParams)]
pub struct SignedSymbolQuery {
    pub symbol: String,
    pub timestamp: i64,
}

impl SignedSymbolQuery {
    pub fn new(instrument: &Instrument, timestamp: i64) -> Self {
        Self {
            symbol: instrument.exchange_symbol(),
            timestamp,
        }
    }

    /// Query stamped with the current time in epoch milliseconds.
    pub fn now(instrument: &Instrument) -> Self {
        Self::new(instrument, Utc::now().timestamp_millis())
    }
}

/// Build a [`RestClient`] that signs every request with the provided [`Credentials`].
pub fn signed_client<Url>(base_url: Url, credentials: &Credentials) -> Result<BinanceSignedClient, SocketError>
where
    Url: Into<Cow<'static, str>>,
{
    let mac = Hmac::<Sha256>::new_from_slice(credentials.api_secret.as_bytes())
        .map_err(|error| SocketError::Signing(error.to_string()))?;

    let signer = RequestSigner::new(BinanceSigner::new(credentials.api_key.as_str()), mac, HexEncoder);

    Ok(RestClient::new(base_url, signer, BinanceParser))
}

pub fn public_client<Url>(base_url: Url) -> BinancePublicClient
where
    Url: Into<Cow<'static, str>>,
{
    RestClient::new(base_url, PublicNoAuth, BinanceParser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::new("public-key", "very-secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("public-key"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_signed_symbol_query_params() {
        let query = SignedSymbolQuery::new(&Instrument::new("usdt", "thb"), 1704141000000);
        assert_eq!(query.to_url_params(), "symbol=USDTTHB&timestamp=1704141000000");
    }

    #[test]
    fn test_parse_api_error() {
        struct TestCase {
            status: StatusCode,
            payload: &'static str,
            expected_body: &'static str,
        }

        let cases = vec![
            TestCase {
                // TC0: Binance error payload
                status: StatusCode::UNAUTHORIZED,
                payload: r#"{"code":-2015,"msg":"Invalid API-key, IP, or permissions for action."}"#,
                expected_body: "code -2015: Invalid API-key, IP, or permissions for action.",
            },
            TestCase {
                // TC1: non json body is kept as-is
                status: StatusCode::BAD_GATEWAY,
                payload: "<html>bad gateway</html>",
                expected_body: "<html>bad gateway</html>",
            },
            TestCase {
                // TC2: error status with a payload that would parse as a success response
                status: StatusCode::SERVICE_UNAVAILABLE,
                payload: "[]",
                expected_body: "[]",
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = BinanceParser.parse::<Vec<serde_json::Value>>(test.status, test.payload.as_bytes());
            match actual {
                Err(SocketError::HttpResponse(status, body)) => {
                    assert_eq!(status, test.status, "TC{} failed", index);
                    assert_eq!(body, test.expected_body, "TC{} failed", index);
                }
                other => panic!("TC{index} failed: {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_success_with_unexpected_shape() {
        let actual = BinanceParser.parse::<Vec<serde_json::Value>>(StatusCode::OK, br#"{"unexpected":true}"#);
        assert!(matches!(actual, Err(SocketError::DeserializingJson { .. })));
    }
}

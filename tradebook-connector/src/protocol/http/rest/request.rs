use std::{borrow::Cow, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

/// Default Http [`reqwest::Request`] timeout Duration.
pub const DEFAULT_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Render a value as the exact `k=v&k=v` query string sent on the wire, which is also the
/// payload signed by authenticated requests. Usually derived with
/// `#[derive(AsUrlParams)]` from `tradebook-macro`.
pub trait AsUrlParams {
    fn to_url_params(&self) -> String;
}

impl AsUrlParams for () {
    fn to_url_params(&self) -> String {
        String::new()
    }
}

/// Http REST request that can be executed by a [`RestClient`](super::client::RestClient).
pub trait RestRequest {
    /// Expected response type if this request was successful.
    type Response: DeserializeOwned;

    /// Serialisable query parameters type - use unit struct () if not required for this request.
    type QueryParams: Serialize + AsUrlParams;

    /// Serialisable Body type - use unit struct () if not required for this request.
    type Body: Serialize;

    /// Path of the resource, appended to the client base url.
    fn path(&self) -> Cow<'static, str>;

    /// Http [`reqwest::Method`] of this request.
    fn method() -> reqwest::Method;

    /// Optional query parameters for this request.
    fn query_params(&self) -> Option<&Self::QueryParams> {
        None
    }

    /// Optional Body for this request.
    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Http request timeout [`Duration`].
    fn timeout() -> Duration {
        DEFAULT_HTTP_REQUEST_TIMEOUT
    }
}

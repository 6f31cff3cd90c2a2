use std::borrow::Cow;

use tradebook_model::{instruments::Instrument, record::RawOrder};

use crate::{exchange::binance::SignedSymbolQuery, protocol::http::rest::request::RestRequest};

/// `GET /api/v1/allOrders` (SIGNED): every order of the account for one symbol, in any
/// status.
#[derive(Debug, Clone)]
pub struct AllOrdersRequest {
    query: SignedSymbolQuery,
}

impl AllOrdersRequest {
    pub fn new(instrument: &Instrument) -> Self {
        Self {
            query: SignedSymbolQuery::now(instrument),
        }
    }
}

impl RestRequest for AllOrdersRequest {
    type Response = Vec<RawOrder>;
    type QueryParams = SignedSymbolQuery;
    type Body = ();

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/v1/allOrders")
    }

    fn method() -> reqwest::Method {
        reqwest::Method::GET
    }

    fn query_params(&self) -> Option<&Self::QueryParams> {
        Some(&self.query)
    }
}

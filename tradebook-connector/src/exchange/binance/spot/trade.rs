use std::borrow::Cow;

use tradebook_model::{instruments::Instrument, record::RawFill};

use crate::{exchange::binance::SignedSymbolQuery, protocol::http::rest::request::RestRequest};

/// `GET /api/v3/myTrades` (USER_DATA): fills of the account for one symbol.
///
/// See docs: <https://binance-docs.github.io/apidocs/spot/en/#account-trade-list-user_data>
#[derive(Debug, Clone)]
pub struct AccountTradesRequest {
    query: SignedSymbolQuery,
}

impl AccountTradesRequest {
    pub fn new(instrument: &Instrument) -> Self {
        Self {
            query: SignedSymbolQuery::now(instrument),
        }
    }
}

impl RestRequest for AccountTradesRequest {
    type Response = Vec<RawFill>;
    type QueryParams = SignedSymbolQuery;
    type Body = ();

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/v3/myTrades")
    }

    fn method() -> reqwest::Method {
        reqwest::Method::GET
    }

    fn query_params(&self) -> Option<&Self::QueryParams> {
        Some(&self.query)
    }
}

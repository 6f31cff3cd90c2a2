use serde::{Deserialize, Serialize};

/// Account trade fill as returned by `GET /api/v3/myTrades`.
///
/// Numeric fields stay string encoded until normalization so that a malformed value is
/// reported against the field it came from rather than rejected as a whole payload.
///
/// ### Raw Payload Examples
/// See docs: <https://binance-docs.github.io/apidocs/spot/en/#account-trade-list-user_data>
/// ```json
/// {
///     "symbol": "BTCUSDT",
///     "id": 28457,
///     "orderId": 100234,
///     "orderListId": -1,
///     "price": "42150.01000000",
///     "qty": "0.00120000",
///     "quoteQty": "50.58001200",
///     "commission": "0.00000120",
///     "commissionAsset": "BTC",
///     "time": 1704141000000,
///     "isBuyer": true,
///     "isMaker": false,
///     "isBestMatch": true
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFill {
    pub order_id: u64,
    pub time: u64,
    pub is_buyer: bool,
    pub price: String,
    pub qty: String,
    pub quote_qty: String,
    pub commission: String,
    pub commission_asset: String,
}

/// Order as returned by `GET /api/v1/allOrders`.
///
/// The cumulative quote quantity is published under two spellings depending on the API
/// version, so both are captured and the normalizer picks whichever is present.
///
/// ### Raw Payload Examples
/// ```json
/// {
///     "symbol": "USDTTHB",
///     "orderId": 3310,
///     "price": "0.00",
///     "origQty": "100.00",
///     "executedQty": "100.00",
///     "cummulativeQuoteQty": "3450.00",
///     "status": "FILLED",
///     "type": "MARKET",
///     "side": "BUY",
///     "time": 1704141000000
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub status: String,
    pub side: String,
    pub time: u64,
    pub orig_qty: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub cumulative_quote_qty: Option<String>,
    #[serde(default)]
    pub cummulative_quote_qty: Option<String>,
}

impl RawOrder {
    pub const STATUS_FILLED: &'static str = "FILLED";

    pub fn is_filled(&self) -> bool {
        self.status == Self::STATUS_FILLED
    }

    /// First non-empty cumulative quote quantity across both field spellings.
    pub fn quote_qty(&self) -> Option<&str> {
        [&self.cumulative_quote_qty, &self.cummulative_quote_qty]
            .into_iter()
            .flatten()
            .map(|value| value.as_str())
            .find(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_de_raw_fill() {
        let input = r#"
        {
            "symbol": "BTCUSDT", "id": 28457, "orderId": 100234, "orderListId": -1,
            "price": "42150.01000000", "qty": "0.00120000", "quoteQty": "50.58001200",
            "commission": "0.00000120", "commissionAsset": "BTC", "time": 1704141000000,
            "isBuyer": true, "isMaker": false, "isBestMatch": true
        }
        "#;

        let actual = serde_json::from_str::<RawFill>(input).unwrap();
        assert_eq!(
            actual,
            RawFill {
                order_id: 100234,
                time: 1704141000000,
                is_buyer: true,
                price: "42150.01000000".to_string(),
                qty: "0.00120000".to_string(),
                quote_qty: "50.58001200".to_string(),
                commission: "0.00000120".to_string(),
                commission_asset: "BTC".to_string(),
            }
        );
    }

    #[test]
    fn test_de_raw_order() {
        struct TestCase {
            input: &'static str,
            expected_quote_qty: Option<&'static str>,
        }

        let cases = vec![
            TestCase {
                // TC0: legacy misspelled field
                input: r#"{"status":"FILLED","side":"BUY","time":1,"origQty":"2","price":"0","cummulativeQuoteQty":"200"}"#,
                expected_quote_qty: Some("200"),
            },
            TestCase {
                // TC1: corrected spelling
                input: r#"{"status":"FILLED","side":"BUY","time":1,"origQty":"2","cumulativeQuoteQty":"150"}"#,
                expected_quote_qty: Some("150"),
            },
            TestCase {
                // TC2: both present, corrected spelling preferred
                input: r#"{"status":"FILLED","side":"SELL","time":1,"origQty":"2","cumulativeQuoteQty":"150","cummulativeQuoteQty":"151"}"#,
                expected_quote_qty: Some("150"),
            },
            TestCase {
                // TC3: empty corrected spelling falls through to legacy field
                input: r#"{"status":"NEW","side":"SELL","time":1,"origQty":"2","cumulativeQuoteQty":"","cummulativeQuoteQty":"90"}"#,
                expected_quote_qty: Some("90"),
            },
            TestCase {
                // TC4: neither present
                input: r#"{"status":"CANCELED","side":"SELL","time":1,"origQty":"2"}"#,
                expected_quote_qty: None,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = serde_json::from_str::<RawOrder>(test.input).unwrap();
            assert_eq!(actual.quote_qty(), test.expected_quote_qty, "TC{} failed", index);
        }
    }

    #[test]
    fn test_raw_order_is_filled() {
        let order = |status: &str| RawOrder {
            status: status.to_string(),
            side: "BUY".to_string(),
            time: 0,
            orig_qty: "1".to_string(),
            price: None,
            cumulative_quote_qty: None,
            cummulative_quote_qty: None,
        };

        assert!(order("FILLED").is_filled());
        assert!(!order("PARTIALLY_FILLED").is_filled());
        assert!(!order("filled").is_filled());
    }
}

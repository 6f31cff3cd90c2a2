use serde::Serialize;
use tradebook_macro::AsUrlParams;

trait AsUrlParams {
    fn to_url_params(&self) -> String;
}

#[derive(Serialize, AsUrlParams)]
struct SignedQuery {
    pub symbol: String,
    pub timestamp: u64,
}

#[derive(Serialize, AsUrlParams)]
struct OptionalQuery {
    pub symbol: String,
    pub limit: Option<u32>,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_url_params_keeps_declaration_order() {
        let params = SignedQuery {
            symbol: "USDTTHB".to_string(),
            timestamp: 1704141000000,
        };
        assert_eq!(params.to_url_params(), "symbol=USDTTHB&timestamp=1704141000000");
    }

    #[test]
    fn test_as_url_params_with_null() {
        let params = OptionalQuery {
            symbol: "BTCUSDT".to_string(),
            limit: None,
            timestamp: 42,
        };
        assert_eq!(params.to_url_params(), "symbol=BTCUSDT&timestamp=42");

        let params = OptionalQuery {
            symbol: "BTCUSDT".to_string(),
            limit: Some(500),
            timestamp: 42,
        };
        assert_eq!(params.to_url_params(), "symbol=BTCUSDT&limit=500&timestamp=42");
    }
}

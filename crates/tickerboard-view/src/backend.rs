use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Routes exposed by the backend proxy. Every route is a `POST`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Profile,
    IncomeStatement,
    BalanceSheetStatement,
    CashFlowStatement,
    HistoricalPrice,
    MarketIndex,
    MarketNews,
}

impl Endpoint {
    /// Path relative to the backend base url, without the leading slash.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Profile => "profile-data",
            Endpoint::IncomeStatement => "income-statement-data",
            Endpoint::BalanceSheetStatement => "balance-sheet-statement-data",
            Endpoint::CashFlowStatement => "cash-flow-statement-data",
            Endpoint::HistoricalPrice => "historical-price-data",
            Endpoint::MarketIndex => "market-index-data",
            Endpoint::MarketNews => "market-news",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// JSON body of the ticker page requests.
///
/// ```json
/// { "ticker": "AAPL", "limit": 1 }
/// ```
///
/// `limit` is only sent to the statement routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerQuery {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TickerQuery {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The backend proxy, as seen by the controllers.
///
/// Implementations return the raw JSON body; decoding into per-endpoint types
/// happens in [`models`](crate::models) so every backend shares the same
/// validation.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn post(&self, endpoint: Endpoint, query: Option<&TickerQuery>)
        -> Result<Value, FetchError>;
}

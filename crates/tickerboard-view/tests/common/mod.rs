#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tickerboard_view::{Backend, Endpoint, FetchError, TickerQuery};

type Responder =
    Arc<dyn Fn(Option<&TickerQuery>) -> (Duration, Result<Value, FetchError>) + Send + Sync>;

/// In-memory stand-in for the backend proxy; records every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    responders: HashMap<Endpoint, Responder>,
    calls: Mutex<Vec<(Endpoint, Option<TickerQuery>)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: Endpoint, body: Value) -> Self {
        self.respond_with(endpoint, move |_| (Duration::ZERO, Ok(body.clone())))
    }

    pub fn fail(self, endpoint: Endpoint, err: FetchError) -> Self {
        self.respond_with(endpoint, move |_| (Duration::ZERO, Err(err.clone())))
    }

    pub fn respond_with<F>(mut self, endpoint: Endpoint, responder: F) -> Self
    where
        F: Fn(Option<&TickerQuery>) -> (Duration, Result<Value, FetchError>) + Send + Sync + 'static,
    {
        self.responders.insert(endpoint, Arc::new(responder));
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, Option<TickerQuery>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn post(
        &self,
        endpoint: Endpoint,
        query: Option<&TickerQuery>,
    ) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push((endpoint, query.cloned()));

        let (delay, reply) = match self.responders.get(&endpoint) {
            Some(responder) => responder(query),
            None => (
                Duration::ZERO,
                Err(FetchError::Status {
                    endpoint,
                    status: 404,
                }),
            ),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

// fixtures
// ----------------------------------------------------------------------------

pub fn profile(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "price": 182.52,
        "beta": 1.29,
        "companyName": "Apple Inc.",
        "cik": "0000320193",
        "isin": "US0378331005",
        "cusip": "037833100",
        "exchange": "NASDAQ Global Select",
        "website": "https://www.apple.com",
        "image": "https://financialmodelingprep.com/image-stock/AAPL.png",
        "defaultImage": false,
        "changes": -0.71,
        "ceo": "Mr. Timothy D. Cook",
    })
}

pub fn statement(symbol: &str) -> Value {
    json!({
        "date": "2023-09-30",
        "symbol": symbol,
        "reportedCurrency": "USD",
        "revenue": 383285000000_i64,
        "netIncome": 96995000000_i64,
        "eps": 6.16,
        "acceptedDate": "2023-11-02 18:08:27",
        "link": "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm",
        "finalLink": "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm",
    })
}

pub fn historical(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "historical": [
            {
                "date": "2024-01-05",
                "open": 181.99,
                "close": 181.18,
                "volume": 62303300,
                "vwap": 181.33,
                "label": "January 05, 24",
                "changeOverTime": -0.00445,
            },
            {
                "date": "2024-01-04",
                "open": 182.15,
                "close": 181.91,
                "volume": 71983600,
                "vwap": 182.1,
                "label": "January 04, 24",
                "changeOverTime": -0.00132,
            },
        ]
    })
}

pub fn dow() -> Value {
    json!({
        "symbol": "^DJI",
        "name": "Dow Jones Industrial Average",
        "price": 37466.11,
        "changesPercentage": 0.07,
        "change": 25.77,
        "dayLow": 37184.1,
        "dayHigh": 37629.88,
        "exchange": "INDEX",
        "eps": null,
        "pe": null,
        "marketCap": null,
    })
}

/// A ticker page backend answering every route for whichever ticker is asked.
pub fn ticker_backend() -> FakeBackend {
    fn ticker(query: Option<&TickerQuery>) -> String {
        query.map(|q| q.ticker.clone()).unwrap_or_default()
    }

    FakeBackend::new()
        .respond_with(Endpoint::Profile, |q| (Duration::ZERO, Ok(profile(&ticker(q)))))
        .respond_with(Endpoint::IncomeStatement, |q| (Duration::ZERO, Ok(statement(&ticker(q)))))
        .respond_with(Endpoint::BalanceSheetStatement, |q| {
            (Duration::ZERO, Ok(statement(&ticker(q))))
        })
        .respond_with(Endpoint::CashFlowStatement, |q| {
            (Duration::ZERO, Ok(statement(&ticker(q))))
        })
        .respond_with(Endpoint::HistoricalPrice, |q| {
            (Duration::ZERO, Ok(historical(&ticker(q))))
        })
}

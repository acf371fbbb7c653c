//! Response bodies of the backend proxy.
//!
//! Each type knows the few fields its view depends on; everything else stays
//! in an ordered [`Record`] and is printed generically.

use crate::backend::Endpoint;
use crate::error::FetchError;
use crate::record::Record;
use serde::Deserialize;
use serde_json::Value;

fn object(endpoint: Endpoint, value: Value) -> Result<Record, FetchError> {
    Record::from_value(value).ok_or_else(|| FetchError::malformed(endpoint, "expected a JSON object"))
}

fn required(endpoint: Endpoint, record: &Record, key: &str) -> Result<String, FetchError> {
    record
        .text(key)
        .ok_or_else(|| FetchError::malformed(endpoint, format!("missing field `{key}`")))
}

// ticker page
// ----------------------------------------------------------------------------

/// `/profile-data`: company profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub symbol: String,
    pub record: Record,
}

impl Profile {
    pub fn decode(value: Value) -> Result<Self, FetchError> {
        let record = object(Endpoint::Profile, value)?;
        let symbol = required(Endpoint::Profile, &record, "symbol")?;
        Ok(Self { symbol, record })
    }
}

/// Latest income statement, balance sheet or cash flow statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub record: Record,
}

impl Statement {
    pub fn decode(endpoint: Endpoint, value: Value) -> Result<Self, FetchError> {
        Ok(Self {
            record: object(endpoint, value)?,
        })
    }
}

/// `/historical-price-data`, reduced to its most recent point.
///
/// ```json
/// { "symbol": "AAPL", "historical": [ { "date": "2024-01-05", "close": 181.18, ... }, ... ] }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalPrice {
    pub symbol: String,
    pub latest: PricePoint,
}

/// One day of price history.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub record: Record,
}

impl HistoricalPrice {
    /// Only the first element of `historical` is looked at; older points are
    /// neither decoded nor validated.
    pub fn decode(value: Value) -> Result<Self, FetchError> {
        const ENDPOINT: Endpoint = Endpoint::HistoricalPrice;

        let mut body = object(ENDPOINT, value)?;
        let symbol = required(ENDPOINT, &body, "symbol")?;

        let first = match body.take("historical") {
            Some(Value::Array(points)) => points.into_iter().next(),
            Some(_) => return Err(FetchError::malformed(ENDPOINT, "`historical` is not a list")),
            None => return Err(FetchError::malformed(ENDPOINT, "missing field `historical`")),
        }
        .ok_or_else(|| FetchError::malformed(ENDPOINT, "`historical` is empty"))?;

        let record = Record::from_value(first)
            .ok_or_else(|| FetchError::malformed(ENDPOINT, "price point is not a JSON object"))?;
        let date = required(ENDPOINT, &record, "date")?;

        Ok(Self {
            symbol,
            latest: PricePoint { date, record },
        })
    }
}

// home page
// ----------------------------------------------------------------------------

/// The indices the home page has a widget for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarketIndex {
    DowJones,
    Sp500,
    Nasdaq,
}

impl MarketIndex {
    pub const ALL: [MarketIndex; 3] = [MarketIndex::DowJones, MarketIndex::Sp500, MarketIndex::Nasdaq];

    pub fn symbol(&self) -> &'static str {
        match self {
            MarketIndex::DowJones => "^DJI",
            MarketIndex::Sp500 => "^SP500TR",
            MarketIndex::Nasdaq => "^IXIC",
        }
    }

    /// Exact match only; `^dji` or `DJI` are not the Dow.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|index| index.symbol() == symbol)
    }
}

/// An entry of `/market-index-data` whose symbol is a known index.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexEntry {
    pub index: MarketIndex,
    pub record: Record,
}

/// Decodes the `/market-index-data` list, keeping known indices in response
/// order (duplicates included) and dropping everything else.
pub fn index_entries(value: Value) -> Result<Vec<IndexEntry>, FetchError> {
    let Value::Array(entries) = value else {
        return Err(FetchError::malformed(Endpoint::MarketIndex, "expected a list"));
    };

    Ok(entries
        .into_iter()
        .filter_map(Record::from_value)
        .filter_map(|record| {
            let index = match record.get("symbol") {
                Some(Value::String(symbol)) => MarketIndex::from_symbol(symbol)?,
                _ => return None,
            };
            Some(IndexEntry { index, record })
        })
        .collect())
}

/// A known index with the fields its widget and the daily close summary need.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexQuote {
    pub index: MarketIndex,
    pub name: String,
    pub price: String,
    pub change: String,
    pub record: Record,
}

impl IndexQuote {
    pub fn decode(entry: IndexEntry) -> Result<Self, FetchError> {
        const ENDPOINT: Endpoint = Endpoint::MarketIndex;

        let IndexEntry { index, record } = entry;
        Ok(Self {
            index,
            name: required(ENDPOINT, &record, "name")?,
            price: required(ENDPOINT, &record, "price")?,
            change: required(ENDPOINT, &record, "change")?,
            record,
        })
    }
}

/// A `/market-news` headline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    pub url: String,
    pub title: String,
}

impl NewsItem {
    pub fn decode_list(value: Value) -> Result<Vec<Self>, FetchError> {
        serde_json::from_value(value)
            .map_err(|err| FetchError::malformed(Endpoint::MarketNews, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_requires_a_symbol() {
        let profile = Profile::decode(json!({ "symbol": "AAPL", "price": 1 })).unwrap();
        assert_eq!(profile.symbol, "AAPL");
        assert_eq!(profile.record.len(), 2);

        let err = Profile::decode(json!({ "price": 1 })).unwrap_err();
        assert_eq!(err, FetchError::malformed(Endpoint::Profile, "missing field `symbol`"));

        assert!(Profile::decode(json!([{ "symbol": "AAPL" }])).is_err());
    }

    #[test]
    fn historical_keeps_only_the_first_point() {
        let price = HistoricalPrice::decode(json!({
            "symbol": "AAPL",
            "historical": [
                { "date": "2024-01-05", "close": 181.18 },
                { "date": "2024-01-04", "close": 181.91 },
                "not even a record",
            ]
        }))
        .unwrap();

        assert_eq!(price.symbol, "AAPL");
        assert_eq!(price.latest.date, "2024-01-05");
        assert_eq!(price.latest.record.text("close").as_deref(), Some("181.18"));
    }

    #[test]
    fn historical_rejects_missing_points() {
        for body in [
            json!({ "symbol": "AAPL" }),
            json!({ "symbol": "AAPL", "historical": [] }),
            json!({ "symbol": "AAPL", "historical": {} }),
            json!({ "symbol": "AAPL", "historical": [{ "close": 1 }] }),
            json!({ "historical": [{ "date": "2024-01-05" }] }),
        ] {
            let err = HistoricalPrice::decode(body).unwrap_err();
            assert_eq!(err.endpoint(), Endpoint::HistoricalPrice);
        }
    }

    #[test]
    fn index_entries_match_exact_symbols_in_order() {
        let entries = index_entries(json!([
            { "symbol": "^IXIC", "name": "NASDAQ" },
            { "symbol": "^GSPC", "name": "S&P 500" },
            { "symbol": "^dji", "name": "lowercase" },
            { "name": "no symbol" },
            42,
            { "symbol": "^DJI", "name": "Dow Jones" },
            { "symbol": "^IXIC", "name": "NASDAQ again" },
        ]))
        .unwrap();

        let indices: Vec<MarketIndex> = entries.iter().map(|e| e.index).collect();
        assert_eq!(
            indices,
            vec![MarketIndex::Nasdaq, MarketIndex::DowJones, MarketIndex::Nasdaq]
        );

        assert!(index_entries(json!({ "symbol": "^DJI" })).is_err());
    }

    #[test]
    fn quotes_need_name_price_and_change() {
        let entry = IndexEntry {
            index: MarketIndex::Sp500,
            record: Record::from_value(json!({
                "symbol": "^SP500TR", "name": "S&P 500 (TR)", "price": 10234.5, "change": -12.25
            }))
            .unwrap(),
        };
        let quote = IndexQuote::decode(entry.clone()).unwrap();
        assert_eq!(quote.name, "S&P 500 (TR)");
        assert_eq!(quote.price, "10234.5");
        assert_eq!(quote.change, "-12.25");

        let mut missing = entry;
        missing.record = Record::from_value(json!({ "symbol": "^SP500TR", "name": "x" })).unwrap();
        assert!(IndexQuote::decode(missing).is_err());
    }

    #[test]
    fn news_items_ignore_extra_fields() {
        let items = NewsItem::decode_list(json!([
            { "url": "http://a", "title": "A", "source": "wire" },
            { "url": "http://b", "title": "B" },
        ]))
        .unwrap();
        assert_eq!(items[0], NewsItem { url: "http://a".into(), title: "A".into() });
        assert_eq!(items.len(), 2);

        assert!(NewsItem::decode_list(json!([{ "title": "no url" }])).is_err());
    }
}

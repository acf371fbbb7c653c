use crate::backend::{Backend, Endpoint, TickerQuery};
use crate::error::FetchError;
use crate::models::{HistoricalPrice, Profile, Statement};
use crate::region::{Block, Region};
use crate::render::{display_record, ExclusionSet};
use crate::token::{RequestToken, TokenTracker};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

/// Statements are requested one period deep.
const STATEMENT_LIMIT: u32 = 1;

/// A security symbol as typed by the user, uppercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Self {
        Self(input.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The regions of the ticker page.
#[derive(Clone, Debug)]
pub struct TickerRegions {
    /// `Key Financials: <TICKER>` heading.
    pub key_financials: Region,
    pub profile: Region,
    pub income_statement: Region,
    pub balance_sheet: Region,
    pub cash_flow_statement: Region,
    /// Most recent close.
    pub recent: Region,
}

impl Default for TickerRegions {
    fn default() -> Self {
        Self {
            key_financials: Region::new("keyFinancials"),
            profile: Region::new("profile"),
            income_statement: Region::new("incomeStatement"),
            balance_sheet: Region::new("balanceSheet"),
            cash_flow_statement: Region::new("cashFlowStatement"),
            recent: Region::new("recent"),
        }
    }
}

impl TickerRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every region, in page order.
    pub fn all(&self) -> [&Region; 6] {
        [
            &self.key_financials,
            &self.profile,
            &self.income_statement,
            &self.balance_sheet,
            &self.cash_flow_statement,
            &self.recent,
        ]
    }

    fn data(&self) -> [&Region; 5] {
        [
            &self.profile,
            &self.income_statement,
            &self.balance_sheet,
            &self.cash_flow_statement,
            &self.recent,
        ]
    }
}

/// One form submission: the normalized ticker and the token its responses
/// must still hold to be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub ticker: Ticker,
    pub token: RequestToken,
}

/// Ticker page controller.
///
/// A submission fans out five independent requests; each response renders
/// into its own region as soon as it arrives, unless a newer submission has
/// been made in the meantime.
#[derive(Clone)]
pub struct TickerPage {
    backend: Arc<dyn Backend>,
    regions: TickerRegions,
    tokens: Arc<TokenTracker>,
}

impl TickerPage {
    pub fn new(backend: Arc<dyn Backend>, regions: TickerRegions) -> Self {
        Self {
            backend,
            regions,
            tokens: Arc::new(TokenTracker::new()),
        }
    }

    pub fn regions(&self) -> &TickerRegions {
        &self.regions
    }

    /// Whether `submission` is still the latest one.
    pub fn is_current(&self, submission: &Submission) -> bool {
        self.tokens.is_current(submission.token)
    }

    /// The synchronous half of a submission: normalizes the ticker, supersedes
    /// earlier submissions, writes the summary heading and blanks every data
    /// region.
    pub fn begin(&self, input: &str) -> Submission {
        let ticker = Ticker::parse(input);
        let token = self.tokens.issue();
        info!("submission #{} for [{ticker}]", token.generation());

        self.regions
            .key_financials
            .replace(vec![Block::heading(2, format!("Key Financials: {ticker}"))]);
        for region in self.regions.data() {
            region.clear();
        }

        Submission { ticker, token }
    }

    /// Issues the five requests concurrently and renders each on arrival.
    /// Resolves once every request has rendered or been discarded.
    pub async fn fetch(&self, submission: &Submission) {
        futures::join!(
            self.profile(submission),
            self.statement(
                submission,
                Endpoint::IncomeStatement,
                &self.regions.income_statement,
                "Income Statement",
            ),
            self.statement(
                submission,
                Endpoint::BalanceSheetStatement,
                &self.regions.balance_sheet,
                "Balance Sheet",
            ),
            self.statement(
                submission,
                Endpoint::CashFlowStatement,
                &self.regions.cash_flow_statement,
                "Cash Flow Statement",
            ),
            self.historical_price(submission),
        );
    }

    pub async fn submit(&self, input: &str) -> Submission {
        let submission = self.begin(input);
        self.fetch(&submission).await;
        submission
    }

    /// Fire-and-forget submission on the tokio runtime.
    ///
    /// The submission is begun before returning, so a later call always
    /// supersedes this one regardless of how the tasks get scheduled.
    pub fn spawn_submit(&self, input: &str) -> JoinHandle<Submission> {
        let submission = self.begin(input);
        let page = self.clone();
        tokio::spawn(async move {
            page.fetch(&submission).await;
            submission
        })
    }

    async fn profile(&self, submission: &Submission) {
        let query = TickerQuery::new(submission.ticker.as_str());
        let blocks = self
            .post(Endpoint::Profile, &query)
            .await
            .and_then(Profile::decode)
            .map(|profile| {
                let mut blocks = vec![Block::heading(3, format!("About: {}", profile.symbol))];
                display_record(&mut blocks, &profile.record, &ExclusionSet::PROFILE);
                blocks
            });

        self.render(submission, Endpoint::Profile, &self.regions.profile, blocks);
    }

    async fn statement(
        &self,
        submission: &Submission,
        endpoint: Endpoint,
        region: &Region,
        title: &str,
    ) {
        let query = TickerQuery::new(submission.ticker.as_str()).with_limit(STATEMENT_LIMIT);
        let blocks = self
            .post(endpoint, &query)
            .await
            .and_then(|body| Statement::decode(endpoint, body))
            .map(|statement| {
                let mut blocks = vec![Block::heading(3, title)];
                display_record(&mut blocks, &statement.record, &ExclusionSet::STATEMENT);
                blocks
            });

        self.render(submission, endpoint, region, blocks);
    }

    async fn historical_price(&self, submission: &Submission) {
        let query = TickerQuery::new(submission.ticker.as_str());
        let blocks = self
            .post(Endpoint::HistoricalPrice, &query)
            .await
            .and_then(HistoricalPrice::decode)
            .map(|price| {
                let mut blocks = vec![
                    Block::heading(5, format!("Most Recent Close: {}", price.symbol)),
                    Block::heading(6, format!("Date: {}", price.latest.date)),
                    Block::Break,
                ];
                display_record(&mut blocks, &price.latest.record, &ExclusionSet::HISTORICAL);
                blocks
            });

        self.render(submission, Endpoint::HistoricalPrice, &self.regions.recent, blocks);
    }

    async fn post(&self, endpoint: Endpoint, query: &TickerQuery) -> Result<Value, FetchError> {
        trace!("requesting {endpoint} for [{}]", query.ticker);
        self.backend.post(endpoint, Some(query)).await
    }

    fn render(
        &self,
        submission: &Submission,
        endpoint: Endpoint,
        region: &Region,
        blocks: Result<Vec<Block>, FetchError>,
    ) {
        let failed = blocks.is_err();
        let blocks = blocks.unwrap_or_else(|err| vec![Block::Error(err.to_string())]);

        if !region.replace_if(|| self.tokens.is_current(submission.token), blocks) {
            debug!(
                "discarding stale {endpoint} response for [{}], submission #{}",
                submission.ticker,
                submission.token.generation()
            );
            return;
        }

        if failed {
            error!("{endpoint} failed for [{}]; error shown in #{}", submission.ticker, region.id());
        } else {
            debug!("{endpoint} rendered into #{} for [{}]", region.id(), submission.ticker);
        }
    }
}

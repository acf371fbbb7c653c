use crate::backend::{Backend, Endpoint};
use crate::models::{index_entries, IndexQuote, MarketIndex, NewsItem};
use crate::region::{Block, Region};
use crate::render::{display_record, ExclusionSet};
use crate::token::{RequestToken, TokenTracker};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

/// The regions of the home page.
#[derive(Clone, Debug)]
pub struct HomeRegions {
    pub dow_jones: Region,
    pub sp500: Region,
    pub nasdaq: Region,
    /// `name : price` and the day's change, one entry per rendered index.
    pub daily_close: Region,
    pub news: Region,
}

impl Default for HomeRegions {
    fn default() -> Self {
        Self {
            dow_jones: Region::new("DJI"),
            sp500: Region::new("SP500"),
            nasdaq: Region::new("NASDAQ"),
            daily_close: Region::new("dailyClose"),
            news: Region::new("news"),
        }
    }
}

impl HomeRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every region, in page order.
    pub fn all(&self) -> [&Region; 5] {
        [
            &self.dow_jones,
            &self.sp500,
            &self.nasdaq,
            &self.daily_close,
            &self.news,
        ]
    }

    pub fn widget(&self, index: MarketIndex) -> &Region {
        match index {
            MarketIndex::DowJones => &self.dow_jones,
            MarketIndex::Sp500 => &self.sp500,
            MarketIndex::Nasdaq => &self.nasdaq,
        }
    }
}

/// Home page controller: market index widgets and headlines, fetched on load.
#[derive(Clone)]
pub struct HomePage {
    backend: Arc<dyn Backend>,
    regions: HomeRegions,
    tokens: Arc<TokenTracker>,
}

impl HomePage {
    pub fn new(backend: Arc<dyn Backend>, regions: HomeRegions) -> Self {
        Self {
            backend,
            regions,
            tokens: Arc::new(TokenTracker::new()),
        }
    }

    pub fn regions(&self) -> &HomeRegions {
        &self.regions
    }

    /// Blanks the page and requests the market index snapshot and the news
    /// concurrently. A later load supersedes this one.
    pub async fn load(&self) -> RequestToken {
        let token = self.begin();
        self.fetch(token).await;
        token
    }

    pub fn spawn_load(&self) -> JoinHandle<RequestToken> {
        let token = self.begin();
        let page = self.clone();
        tokio::spawn(async move {
            page.fetch(token).await;
            token
        })
    }

    fn begin(&self) -> RequestToken {
        let token = self.tokens.issue();
        info!("home page load #{}", token.generation());
        for region in self.regions.all() {
            region.clear();
        }
        token
    }

    async fn fetch(&self, token: RequestToken) {
        futures::join!(self.market_index(token), self.market_news(token));
    }

    async fn market_index(&self, token: RequestToken) {
        trace!("requesting {}", Endpoint::MarketIndex);
        let entries = match self
            .backend
            .post(Endpoint::MarketIndex, None)
            .await
            .and_then(index_entries)
        {
            Ok(entries) => entries,
            Err(err) => {
                error!("market index unavailable, error({err})");
                for index in MarketIndex::ALL {
                    self.write(token, self.regions.widget(index), vec![Block::Error(err.to_string())]);
                }
                return;
            }
        };

        // a repeated symbol overwrites its widget but still adds a daily close entry
        let mut widgets: HashMap<MarketIndex, Vec<Block>> = HashMap::new();
        let mut daily_close = Vec::new();
        for entry in entries {
            let index = entry.index;
            match IndexQuote::decode(entry) {
                Ok(quote) => {
                    let mut blocks = vec![Block::heading(3, quote.name.as_str())];
                    display_record(&mut blocks, &quote.record, &ExclusionSet::MARKET_INDEX);
                    widgets.insert(index, blocks);

                    daily_close.extend([
                        Block::heading(4, format!("{} : {}", quote.name, quote.price)),
                        Block::heading(6, format!("Change: {}", quote.change)),
                        Block::Break,
                    ]);
                }
                Err(err) => {
                    error!("{} entry unusable, error({err})", index.symbol());
                    widgets.insert(index, vec![Block::Error(err.to_string())]);
                }
            }
        }

        for (index, blocks) in widgets {
            debug!("rendering {} widget", index.symbol());
            self.write(token, self.regions.widget(index), blocks);
        }
        self.write(token, &self.regions.daily_close, daily_close);
    }

    async fn market_news(&self, token: RequestToken) {
        trace!("requesting {}", Endpoint::MarketNews);
        let blocks = match self
            .backend
            .post(Endpoint::MarketNews, None)
            .await
            .and_then(NewsItem::decode_list)
        {
            Ok(items) => {
                debug!("{} headlines", items.len());
                let mut blocks = vec![Block::heading(3, "News:")];
                for item in items {
                    blocks.push(Block::link(item.url, item.title));
                    blocks.push(Block::Break);
                }
                blocks
            }
            Err(err) => {
                error!("market news unavailable, error({err})");
                vec![Block::Error(err.to_string())]
            }
        };

        self.write(token, &self.regions.news, blocks);
    }

    fn write(&self, token: RequestToken, region: &Region, blocks: Vec<Block>) {
        if !region.replace_if(|| self.tokens.is_current(token), blocks) {
            debug!(
                "discarding stale response for #{}, load #{}",
                region.id(),
                token.generation()
            );
        }
    }
}

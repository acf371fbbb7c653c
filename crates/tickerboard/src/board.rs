use crate::print;
use std::sync::Arc;
use tickerboard_view::{Config, HomePage, HomeRegions, HttpBackend, TickerPage, TickerRegions};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

fn ticker_page(config: &Config) -> anyhow::Result<TickerPage> {
    let backend = HttpBackend::new(config).map_err(|err| {
        error!("failed to build http client, error({err})");
        err
    })?;
    Ok(TickerPage::new(Arc::new(backend), TickerRegions::new()))
}

/// Look up a single ticker and print the page once every request settled.
pub(crate) async fn ticker(config: &Config, symbol: &str) -> anyhow::Result<()> {
    let page = ticker_page(config)?;

    let time = std::time::Instant::now();
    let submission = page.submit(symbol).await;
    info!(
        "[{}] rendered, time elapsed: {:?}",
        submission.ticker,
        time.elapsed()
    );

    println!("{}", print::page(&page.regions().all()));
    Ok(())
}

/// Load the home page and print it.
pub(crate) async fn home(config: &Config) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config)?;
    let page = HomePage::new(Arc::new(backend), HomeRegions::new());

    let time = std::time::Instant::now();
    page.load().await;
    info!("home page rendered, time elapsed: {:?}", time.elapsed());

    println!("{}", print::page(&page.regions().all()));
    Ok(())
}

/// Every stdin line is a new submission. Lookups run in the background; a
/// page is printed only if no newer line arrived before it finished.
pub(crate) async fn interactive(config: &Config) -> anyhow::Result<()> {
    let page = ticker_page(config)?;

    let input = BufReader::new(tokio::io::stdin());
    let printed = watch(&page, input, |text| println!("{text}")).await?;
    info!("stdin closed, {printed} pages printed");
    Ok(())
}

/// Submits each non-blank line of `input` and hands every page that is
/// still current once its lookup settles to `emit`. Finished lookups are
/// reaped as they land; returns after `input` closes and the last one did.
async fn watch<R, F>(page: &TickerPage, input: R, mut emit: F) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(String),
{
    let mut lines = input.lines();
    let mut watchers: JoinSet<Option<String>> = JoinSet::new();
    let mut open = true;
    let mut printed = 0;

    loop {
        tokio::select! {
            line = lines.next_line(), if open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let handle = page.spawn_submit(&line);
                    let page = page.clone();
                    watchers.spawn(async move {
                        match handle.await {
                            Ok(submission) if page.is_current(&submission) => {
                                Some(print::page(&page.regions().all()))
                            }
                            Ok(submission) => {
                                debug!("[{}] superseded, not printed", submission.ticker);
                                None
                            }
                            Err(err) => {
                                error!("lookup task failed, error({err})");
                                None
                            }
                        }
                    });
                }
                None => open = false,
            },
            Some(done) = watchers.join_next() => {
                if let Some(text) = done? {
                    emit(text);
                    printed += 1;
                }
            }
            else => break,
        }
    }

    Ok(printed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tickerboard_view::{Backend, Endpoint, FetchError, TickerQuery};

    /// Answers every route for the asked ticker; `AAPL` is slow.
    struct SlowApple;

    #[async_trait::async_trait]
    impl Backend for SlowApple {
        async fn post(
            &self,
            endpoint: Endpoint,
            query: Option<&TickerQuery>,
        ) -> Result<Value, FetchError> {
            let ticker = query.map(|q| q.ticker.clone()).unwrap_or_default();
            if ticker == "AAPL" {
                tokio::time::sleep(Duration::from_millis(60)).await;
            }
            Ok(match endpoint {
                Endpoint::HistoricalPrice => json!({
                    "symbol": ticker,
                    "historical": [{ "date": "2024-01-05", "close": 181.18 }],
                }),
                _ => json!({ "symbol": ticker }),
            })
        }
    }

    #[tokio::test]
    async fn prints_only_the_latest_lookup_and_drains_on_close() {
        let page = TickerPage::new(Arc::new(SlowApple), TickerRegions::new());

        let mut pages = Vec::new();
        let printed = watch(&page, &b"aapl\n   \nmsft\n"[..], |text| pages.push(text))
            .await
            .unwrap();

        assert_eq!(printed, 1);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("About: MSFT"));
        assert!(!pages[0].contains("AAPL"));
    }

    #[tokio::test]
    async fn empty_input_returns_immediately() {
        let page = TickerPage::new(Arc::new(SlowApple), TickerRegions::new());
        let printed = watch(&page, &b""[..], |_| panic!("nothing to print"))
            .await
            .unwrap();
        assert_eq!(printed, 0);
    }
}

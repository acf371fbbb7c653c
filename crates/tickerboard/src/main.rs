mod board;
mod cli;
mod print;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use tickerboard_view::Config;
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// set the trace level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // the flag wins over the environment
    let mut config = Config::from_env();
    if let Some(url) = cli.backend {
        config = config.with_backend(url);
    }
    debug!("backend proxy at {}", config.backend_url);

    use cli::Commands::*;
    match cli.command {
        // `tickerboard ticker <SYMBOL>`
        Ticker { symbol } => board::ticker(&config, &symbol).await?,

        // `tickerboard home`
        Home => board::home(&config).await?,

        // `tickerboard interactive`: one ticker per stdin line
        Interactive => board::interactive(&config).await?,
    }

    Ok(())
}

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,

    /// Base url of the backend proxy.
    ///
    /// Falls back to TICKERBOARD_BACKEND, then to http://127.0.0.1:5000.
    #[arg(short, long, global = true)]
    pub backend: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up one ticker: profile, statements and the most recent close.
    Ticker {
        /// Ticker symbol; case does not matter.
        symbol: String,
    },

    /// Market index widgets, the daily close and market news.
    Home,

    /// Read one ticker per line from stdin, submitting each as it arrives.
    ///
    /// Earlier lookups still in flight are superseded, never waited on.
    Interactive,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

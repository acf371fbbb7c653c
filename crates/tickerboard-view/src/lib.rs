/// Backend proxy seam: the endpoints the dashboard calls and the [`Backend`](backend::Backend) trait.
pub mod backend;

/// Failures of a backend call.
pub mod error;

/// Home page: market index widgets, the daily close summary and market news.
pub mod home;

/// [reqwest] implementation of the backend seam.
///
/// [reqwest]: https://docs.rs/reqwest/latest/reqwest/
pub mod http;

/// Per-endpoint response types, decoded at the boundary.
pub mod models;

/// Flat, ordered key/value records and their text coercion.
pub mod record;

/// Display regions and the blocks rendered into them.
pub mod region;

/// The shared rendering helper and the per-view exclusion sets.
pub mod render;

/// Ticker page: profile, statements and the most recent close.
pub mod ticker;

/// Per-submission request tokens.
pub mod token;

pub use backend::{Backend, Endpoint, TickerQuery};
pub use error::FetchError;
pub use home::{HomePage, HomeRegions};
pub use http::{Config, HttpBackend};
pub use record::Record;
pub use region::{Block, Region};
pub use ticker::{Submission, Ticker, TickerPage, TickerRegions};
pub use token::{RequestToken, TokenTracker};

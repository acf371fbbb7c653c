use crate::backend::{Backend, Endpoint, TickerQuery};
use crate::error::FetchError;
use dotenv::var;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, error, trace};

/// Where the backend proxy listens when nothing says otherwise.
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:5000";

/// Connection settings for [`HttpBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND.to_string(),
            user_agent: concat!("tickerboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Reads `TICKERBOARD_BACKEND` and `USER_AGENT`, falling back to the defaults.
    ///
    /// Call `dotenv::dotenv()` first for a `.env` file to be taken into account.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = var("TICKERBOARD_BACKEND") {
            config.backend_url = url;
        }
        if let Ok(agent) = var("USER_AGENT") {
            config.user_agent = agent;
        }
        config
    }

    pub fn with_backend(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }
}

/// Talks to the backend proxy over HTTP; every call is a JSON `POST`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: HttpClient,
    base: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base, endpoint.path())
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn post(
        &self,
        endpoint: Endpoint,
        query: Option<&TickerQuery>,
    ) -> Result<Value, FetchError> {
        let url = self.url(endpoint);
        trace!("POST {url}, body: {query:?}");

        let mut request = self.client.post(&url);
        if let Some(query) = query {
            request = request.json(query);
        }

        let response = request.send().await.map_err(|err| {
            error!("failed to reach {endpoint}, error({err})");
            FetchError::Transport {
                endpoint,
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{endpoint} responded with {status}");
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|err| {
            error!("failed to parse JSON from {endpoint}, error({err})");
            if err.is_decode() {
                FetchError::malformed(endpoint, err.to_string())
            } else {
                FetchError::Transport {
                    endpoint,
                    message: err.to_string(),
                }
            }
        })?;
        debug!("{endpoint} answered");

        Ok(body)
    }
}

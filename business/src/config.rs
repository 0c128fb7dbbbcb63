use std::env::vars;
use std::time::Duration;

use log::info;
use serde::Deserialize;

/// Connection and caching settings shared by every front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// How long a fetched page is served from cache without refetching.
    pub stale_time: Duration,
    /// How long a page nobody is looking at stays cached before it is dropped.
    pub gc_time: Duration,
    /// Fixed delay between query retries.
    pub retry_delay: Duration,
    /// Automatic retries after the first failed attempt.
    pub max_retries: u32,
    pub session_ttl: Duration,
}

/// Environment overrides, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawOverrides {
    livebet_api_base_url: Option<String>,
    livebet_stale_secs: Option<u64>,
    livebet_gc_secs: Option<u64>,
    livebet_retry_delay_ms: Option<u64>,
    livebet_session_ttl_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults for this build, with `LIVEBET_*` environment variables applied on top.
    pub fn from_env() -> Result<Self, serde_env::Error> {
        let raw: RawOverrides = serde_env::from_iter(vars())?;
        Ok(Self::default().with_overrides(raw))
    }

    fn with_overrides(mut self, raw: RawOverrides) -> Self {
        if let Some(url) = raw.livebet_api_base_url {
            info!("Using LIVEBET_API_BASE_URL: {url}");
            self.api_base_url = url;
        }
        if let Some(secs) = raw.livebet_stale_secs {
            self.stale_time = Duration::from_secs(secs);
        }
        if let Some(secs) = raw.livebet_gc_secs {
            self.gc_time = Duration::from_secs(secs);
        }
        if let Some(ms) = raw.livebet_retry_delay_ms {
            self.retry_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = raw.livebet_session_ttl_secs {
            self.session_ttl = Duration::from_secs(secs);
        }
        self
    }

    /// Root of the REST API, without trailing slash.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.api_base_url.trim_end_matches('/'))
    }

    /// Full URL for an endpoint path. A leading `/` on the endpoint is ignored.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url(), endpoint.trim_start_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(feature = "env_local") {
                "http://127.0.0.1:3001".to_owned()
            } else {
                "http://65.109.108.95:3001".to_owned()
            },
            stale_time: Duration::from_secs(15 * 60),
            gc_time: Duration::from_secs(20 * 60),
            retry_delay: Duration::from_secs(1),
            max_retries: 3,
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

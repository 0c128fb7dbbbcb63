//! Everything a command needs: the API client, the saved config and the locale.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use livebet_business::{ApiClient, BusinessConfig, Locale, Session, SessionStore};
use tracing::{debug, instrument};

use crate::cli::Cli;
use crate::config::Config;

pub struct AppContext {
    pub client: ApiClient,
    pub config: Config,
    pub config_path: PathBuf,
    pub locale: Locale,
}

impl AppContext {
    /// Loads the saved config and restores its session into a fresh client.
    #[instrument(skip_all, name = "build_context")]
    pub fn build(cli: &Cli) -> Result<Self> {
        let config_path = Config::config_path()?;
        let config = Config::load_from(&config_path)?;

        let mut business =
            BusinessConfig::from_env().context("Invalid LIVEBET_* environment variable")?;
        if let Some(url) = &cli.api_url {
            business.api_base_url.clone_from(url);
        }
        debug!(api = %business.api_url(), "Using backend");

        Ok(Self::new(business, config, config_path, cli.locale))
    }

    pub fn new(
        business: BusinessConfig,
        config: Config,
        config_path: PathBuf,
        locale: Option<Locale>,
    ) -> Self {
        let sessions = SessionStore::default();
        if let Some(session) = config.session() {
            sessions.set(session);
        }
        let locale = locale.or(config.locale).unwrap_or_default();
        Self {
            client: ApiClient::new(business, sessions),
            config,
            config_path,
            locale,
        }
    }

    pub fn ensure_authenticated(&self) -> Result<()> {
        if !self.client.is_authenticated() {
            bail!("Not signed in. Use 'livebet login' to sign in.");
        }
        Ok(())
    }

    pub fn save_session(&mut self, session: &Session) -> Result<()> {
        self.config.set_session(session);
        self.config.save_to(&self.config_path)
    }

    pub fn clear_session(&mut self) -> Result<()> {
        livebet_business::logout(&self.client);
        self.config.clear_auth();
        self.config.save_to(&self.config_path)
    }
}

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::listing::{HeadlessFetcher, PageFetcher};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(config: AppConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// State backed by headless Chrome in the configured browser mode
    pub fn with_browser(config: AppConfig) -> Result<Self, ScrapeError> {
        let fetcher = Arc::new(HeadlessFetcher::from_config(&config)?);
        Ok(Self::new(config, fetcher))
    }
}

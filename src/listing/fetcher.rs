//! Page rendering through headless Chrome.
//!
//! The listing table is filled in by JavaScript, so a plain HTTP fetch does not
//! see it. `HeadlessFetcher` drives a real browser either with a fresh instance
//! per request or with one long-lived instance per pool worker.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::listing::pool::WorkerPool;

/// Anything that can turn a URL into rendered HTML.
///
/// Implementations are called from Tokio's blocking pool and may block.
pub trait PageFetcher: Send + Sync {
    /// Load `url`, wait up to `timeout` for `wait_selector`, return the page HTML.
    ///
    /// A selector that never appears is not an error; the caller decides what
    /// an incomplete page means.
    fn fetch(&self, url: &str, wait_selector: &str, timeout: Duration) -> Result<String, ScrapeError>;
}

/// Browser lifetime strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserMode {
    /// Launch and tear down a browser for every request
    #[default]
    PerRequest,
    /// Keep one browser per pool worker and reuse it
    Pooled,
}

impl FromStr for BrowserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "per-request" | "per_request" => Ok(BrowserMode::PerRequest),
            "pooled" | "thread-local" => Ok(BrowserMode::Pooled),
            other => Err(format!("unknown browser mode '{}', expected per-request or pooled", other)),
        }
    }
}

impl fmt::Display for BrowserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserMode::PerRequest => f.write_str("per-request"),
            BrowserMode::Pooled => f.write_str("pooled"),
        }
    }
}

/// Chrome launch settings, copied into each pool job
#[derive(Debug, Clone, Copy)]
struct Launcher {
    sandbox: bool,
    idle_timeout: Duration,
}

impl Launcher {
    fn launch(&self) -> Result<Browser, ScrapeError> {
        let started = Instant::now();
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.sandbox)
            .idle_browser_timeout(self.idle_timeout)
            .build()
            .map_err(|e| ScrapeError::Browser(format!("Invalid launch options: {}", e)))?;

        let browser = Browser::new(options).map_err(browser_error)?;
        debug!("Browser launched in {:.2}s", started.elapsed().as_secs_f64());
        Ok(browser)
    }
}

/// Headless Chrome page fetcher
#[derive(Debug, Clone)]
pub struct HeadlessFetcher {
    mode: BrowserMode,
    launcher: Launcher,
    pool: Option<Arc<WorkerPool<Browser>>>,
}

impl HeadlessFetcher {
    pub fn new(mode: BrowserMode) -> Result<Self, ScrapeError> {
        Self::from_config(&AppConfig {
            browser_mode: mode,
            ..AppConfig::default()
        })
    }

    /// In pooled mode this spawns `browser_pool_size` workers up front;
    /// browsers themselves start on each worker's first request.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        let pool = match config.browser_mode {
            BrowserMode::PerRequest => None,
            BrowserMode::Pooled => Some(Arc::new(WorkerPool::new(config.browser_pool_size, "browser")?)),
        };

        Ok(Self {
            mode: config.browser_mode,
            launcher: Launcher {
                sandbox: config.sandbox,
                idle_timeout: config.idle_browser_timeout,
            },
            pool,
        })
    }

    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    /// Number of pooled browser workers (0 in per-request mode)
    pub fn pool_size(&self) -> usize {
        self.pool.as_ref().map(|p| p.size()).unwrap_or(0)
    }

    fn fetch_per_request(&self, url: &str, wait_selector: &str, timeout: Duration) -> Result<String, ScrapeError> {
        // Dropping `browser` on return shuts Chrome down
        let browser = self.launcher.launch()?;
        let tab = browser.new_tab().map_err(browser_error)?;
        render(&tab, url, wait_selector, timeout)
    }

    fn fetch_pooled(
        &self,
        pool: &WorkerPool<Browser>,
        url: &str,
        wait_selector: &str,
        timeout: Duration,
    ) -> Result<String, ScrapeError> {
        let launcher = self.launcher;
        let url = url.to_string();
        let wait_selector = wait_selector.to_string();

        pool.run(move |slot: &mut Option<Browser>| -> Result<String, ScrapeError> {
            let browser = match slot.take() {
                Some(browser) => browser,
                None => {
                    info!("Launching browser for {:?}", std::thread::current().name());
                    launcher.launch()?
                }
            };

            // A browser that cannot open a tab is dead; leave the slot empty so
            // the worker's next job relaunches.
            let tab = browser.new_tab().map_err(|e| {
                warn!("Discarding worker browser: {}", e);
                browser_error(e)
            })?;
            *slot = Some(browser);

            let result = render(&tab, &url, &wait_selector, timeout);
            if let Err(e) = tab.close(false) {
                debug!("Failed to close tab: {}", e);
            }
            result
        })?
    }
}

impl PageFetcher for HeadlessFetcher {
    fn fetch(&self, url: &str, wait_selector: &str, timeout: Duration) -> Result<String, ScrapeError> {
        info!("Rendering {} ({} browser)", url, self.mode);
        match self.mode {
            BrowserMode::PerRequest => self.fetch_per_request(url, wait_selector, timeout),
            BrowserMode::Pooled => match self.pool {
                Some(ref pool) => self.fetch_pooled(pool, url, wait_selector, timeout),
                None => Err(ScrapeError::Internal("Browser pool not started".to_string())),
            },
        }
    }
}

fn render(tab: &Tab, url: &str, wait_selector: &str, timeout: Duration) -> Result<String, ScrapeError> {
    tab.navigate_to(url).map_err(browser_error)?;
    tab.wait_until_navigated().map_err(browser_error)?;

    if let Err(e) = tab.wait_for_element_with_custom_timeout(wait_selector, timeout) {
        warn!(
            "Selector {} did not appear within {}ms on {}: {}",
            wait_selector,
            timeout.as_millis(),
            url,
            e
        );
    }

    tab.get_content().map_err(browser_error)
}

fn browser_error(e: impl fmt::Display) -> ScrapeError {
    ScrapeError::Browser(e.to_string())
}

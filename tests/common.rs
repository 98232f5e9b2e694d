#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

use axum::Router;
use confscrape::listing::pool::WorkerPool;
use confscrape::{create_router, AppConfig, AppState, PageFetcher, ScrapeError};

/// Listing page with two conference rows, shaped like the live site
pub const LISTING_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Engineering Conferences in Alexandria</title></head>
<body>
  <div class="container">
    <table class="table table-bordered">
      <thead>
        <tr><th>Date</th><th>Conference Name</th><th>Venue</th></tr>
      </thead>
      <tbody>
        <tr class="data1">
          <td>24th Oct</td>
          <td style="text-align: left"><a href="https://allconferencealert.net/eventdetails.php?id=100001">International Conference on Civil and Structural Engineering (ICCSE)</a></td>
          <td>Alexandria, Egypt</td>
        </tr>
        <tr class="data1">
          <td>05th Nov</td>
          <td style="text-align: left"><a href="https://allconferencealert.net/eventdetails.php?id=100002">International Conference on Renewable Energy Systems (ICRES)</a></td>
          <td>Alexandria, Egypt</td>
        </tr>
        <tr class="data2"><td colspan="3">Advertisement</td></tr>
      </tbody>
    </table>
  </div>
</body>
</html>
"#;

pub const NO_TABLE_HTML: &str = r#"
<html><body><div class="alert">No events are scheduled for this location.</div></body></html>
"#;

/// Fetcher that returns canned HTML (or a canned failure) and records URLs
pub struct StaticFetcher {
    response: Result<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn html(html: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(html.to_string()),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, url: &str, _wait_selector: &str, _timeout: Duration) -> Result<String, ScrapeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.response.clone().map_err(ScrapeError::Browser)
    }
}

/// Fetcher that renders on a single-worker pool and records which worker
/// served each request and how many times its session had been used
pub struct PooledRecorder {
    pool: WorkerPool<usize>,
    html: String,
    served: Mutex<Vec<(ThreadId, usize)>>,
}

impl PooledRecorder {
    pub fn new(html: &str) -> Arc<Self> {
        Arc::new(Self {
            pool: WorkerPool::new(1, "recorder").unwrap(),
            html: html.to_string(),
            served: Mutex::new(Vec::new()),
        })
    }

    pub fn served(&self) -> Vec<(ThreadId, usize)> {
        self.served.lock().unwrap().clone()
    }
}

impl PageFetcher for PooledRecorder {
    fn fetch(&self, _url: &str, _wait_selector: &str, _timeout: Duration) -> Result<String, ScrapeError> {
        let html = self.html.clone();
        let (thread, uses, html) = self.pool.run(move |session: &mut Option<usize>| {
            let uses = session.get_or_insert(0);
            *uses += 1;
            (std::thread::current().id(), *uses, html)
        })?;
        self.served.lock().unwrap().push((thread, uses));
        Ok(html)
    }
}

/// A fresh, per-test CSV output directory under the system temp dir
pub fn temp_export_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("confscrape-{}-{}", name, std::process::id()))
}

/// Create the application router for testing
pub fn create_test_app(fetcher: Arc<dyn PageFetcher>) -> Router {
    create_test_app_with_config(fetcher, AppConfig::default())
}

pub fn create_test_app_with_config(fetcher: Arc<dyn PageFetcher>, config: AppConfig) -> Router {
    create_router(AppState::new(config, fetcher))
}

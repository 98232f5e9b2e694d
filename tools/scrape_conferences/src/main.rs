use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use confscrape::export::write_records;
use confscrape::listing::TABLE_SELECTOR;
use confscrape::models::{DEFAULT_CATEGORY, DEFAULT_PLACE};
use confscrape::utils::{is_valid_place_slug, make_listing_url};
use confscrape::{
    parse_conference_table, AppConfig, BrowserMode, Category, HeadlessFetcher, PageFetcher,
    ScrapeResponse,
};

#[derive(Parser, Debug)]
#[command(name = "scrape_conferences")]
#[command(about = "Scrape a conference listing page and print it as JSON or write it as CSV")]
struct Args {
    /// Category slug (e.g., engineering-and-technology, law)
    #[arg(short, long, default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Place slug (e.g., alexandria, new-york)
    #[arg(short, long, default_value = DEFAULT_PLACE)]
    place: String,

    /// Parse a saved HTML file instead of fetching the page
    #[arg(long)]
    input: Option<PathBuf>,

    /// Fetch with a plain HTTP GET instead of a headless browser
    #[arg(long)]
    no_browser: bool,

    /// Write the conferences to this CSV file instead of printing JSON
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Browser: how long to wait for the listing table to render.
    /// --no-browser: total HTTP request timeout. Defaults to PAGE_TIMEOUT_MS.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let category: Category = args.category.parse()?;
    if !is_valid_place_slug(&args.place) {
        bail!("Invalid place slug: {}", args.place);
    }

    let url = make_listing_url(&config.base_url, category.slug(), &args.place);
    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(config.page_timeout);

    let html = if let Some(ref path) = args.input {
        info!("Reading local file: {}", path.display());
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read local file: {}", path.display()))?
    } else if args.no_browser {
        fetch_static(&url, timeout).await?
    } else {
        // Single run, nothing to reuse
        let fetcher = HeadlessFetcher::from_config(&AppConfig {
            browser_mode: BrowserMode::PerRequest,
            ..config.clone()
        })?;
        let target = url.clone();
        tokio::task::spawn_blocking(move || fetcher.fetch(&target, TABLE_SELECTOR, timeout))
            .await
            .context("Browser task panicked")??
    };

    let conferences = parse_conference_table(&html, category.slug(), &args.place)
        .with_context(|| format!("Failed to parse listing from {}", url))?;
    info!("Found {} conferences", conferences.len());

    match args.csv {
        Some(ref path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_records(file, &conferences)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let response = ScrapeResponse::new(conferences);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Plain GET without JavaScript; only useful when the table is server-rendered
async fn fetch_static(url: &str, timeout: Duration) -> Result<String> {
    info!("Fetching {} without a browser", url);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch URL")?
        .error_for_status()
        .context("Listing page returned an error status")?;

    response
        .text()
        .await
        .context("Failed to read response body")
}

pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use error::ScrapeError;
pub use listing::{parse_conference_table, BrowserMode, HeadlessFetcher, PageFetcher};
pub use models::{Category, ConferenceRecord, ErrorResponse, ScrapeQuery, ScrapeResponse};
pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::scrape_conferences),
    components(schemas(ConferenceRecord, ScrapeResponse, ErrorResponse)),
    tags((name = "conferences", description = "Conference listing scraper"))
)]
pub struct ApiDoc;

/// Build the application router: scrape endpoint, banner, OpenAPI docs
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/scrape-conferences", get(handlers::scrape_conferences))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

// handler for GET /
async fn root() -> &'static str {
    "Conference scraper API - try /scrape-conferences?category=engineering-and-technology&place=alexandria"
}

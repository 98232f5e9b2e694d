use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::error::ScrapeError;
use crate::export::write_csv;
use crate::listing::{parse_conference_table, TABLE_SELECTOR};
use crate::models::{Category, ErrorResponse, ScrapeQuery, ScrapeResponse};
use crate::state::AppState;
use crate::utils::{is_valid_place_slug, make_listing_url};

#[utoipa::path(
    get,
    path = "/scrape-conferences",
    tag = "conferences",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Conferences listed for the category and place", body = ScrapeResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 404, description = "Listing table not found", body = ErrorResponse),
        (status = 500, description = "Browser, parse or export failure", body = ErrorResponse)
    )
)]
pub async fn scrape_conferences(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ScrapeResponse>, ScrapeError> {
    let Query(pairs) = pairs.map_err(|e| ScrapeError::InvalidQuery(e.body_text()))?;
    let query = ScrapeQuery::from_pairs(&pairs);

    let category = query.category_or_default();
    let place = query.place_or_default();

    if category.is_empty() || place.is_empty() {
        return Err(ScrapeError::MissingParameters);
    }

    let category: Category = category.parse()?;
    if !is_valid_place_slug(place) {
        return Err(ScrapeError::InvalidPlace);
    }

    let url = make_listing_url(&state.config.base_url, category.slug(), place);
    info!("Scraping {} conferences in {} from {}", category, place, url);

    let fetcher = state.fetcher.clone();
    let timeout = state.config.page_timeout;
    let html = tokio::task::spawn_blocking(move || fetcher.fetch(&url, TABLE_SELECTOR, timeout)).await??;

    let conferences = parse_conference_table(&html, category.slug(), place)?;
    info!("Found {} conferences for {}/{}", conferences.len(), category, place);

    let mut response = ScrapeResponse::new(conferences);
    if query.wants_csv() {
        let path = write_csv(
            &response.conferences,
            &state.config.csv_output_dir,
            category.slug(),
            place,
        )?;
        response.csv_path = Some(path.display().to_string());
    }

    Ok(Json(response))
}

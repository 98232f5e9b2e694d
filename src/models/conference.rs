use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Default category slug when the query omits one
pub const DEFAULT_CATEGORY: &str = "engineering-and-technology";

/// Default place slug when the query omits one
pub const DEFAULT_PLACE: &str = "alexandria";

/// One row of the conference listing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConferenceRecord {
    /// Free-text date as printed by the site (e.g., "24th Oct")
    pub date: String,
    pub title: String,
    pub venue: String,
    /// Detail page URL taken from the title cell
    pub link: String,
    /// Display form of the category slug (e.g., "Engineering And Technology")
    pub category: String,
    /// Display form of the place slug (e.g., "Alexandria")
    pub location: String,
}

/// Query parameters for `GET /scrape-conferences`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrapeQuery {
    /// Category slug (defaults to engineering-and-technology)
    pub category: Option<String>,
    /// Place slug (defaults to alexandria)
    pub place: Option<String>,
    /// Set to 1 to also write the results to a CSV file
    pub save_csv: Option<String>,
}

impl ScrapeQuery {
    /// Build from raw query pairs; when a key repeats, the first value wins
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        Self {
            category: first("category"),
            place: first("place"),
            save_csv: first("save_csv"),
        }
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn place_or_default(&self) -> &str {
        self.place.as_deref().unwrap_or(DEFAULT_PLACE)
    }

    /// Whether CSV export was requested (`1`, `true` or `yes`)
    pub fn wants_csv(&self) -> bool {
        self.save_csv
            .as_deref()
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}

/// Successful scrape result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    pub count: usize,
    pub conferences: Vec<ConferenceRecord>,
    /// Path of the exported CSV file, present only when `save_csv` was set
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub csv_path: Option<String>,
}

impl ScrapeResponse {
    pub fn new(conferences: Vec<ConferenceRecord>) -> Self {
        Self {
            count: conferences.len(),
            conferences,
            csv_path: None,
        }
    }
}

/// Error body returned with every 4xx/5xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

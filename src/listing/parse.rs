//! Parsing of the conference listing table.
//!
//! The site renders one `<table class="table">` whose data rows carry the
//! class `data1`. Cells are positional: date, title (styled
//! `text-align: left`, containing the detail link), venue.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::models::ConferenceRecord;
use crate::utils::{display_category, display_location};

/// Selector the fetcher waits for before reading the page
pub const TABLE_SELECTOR: &str = "table.table";

const ROW_SELECTOR: &str = "tr.data1";
const TITLE_CELL_SELECTOR: &str = r#"td[style="text-align: left"]"#;

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Internal(format!("Bad selector {}: {}", css, e)))
}

/// Collapse an element's text nodes into a single trimmed line
fn cell_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse every data row of the listing table into records.
///
/// Returns `TableNotFound` when the page has no listing table, and
/// `MalformedRow` when a data row lacks one of the positional cells.
pub fn parse_conference_table(
    html: &str,
    category: &str,
    place: &str,
) -> Result<Vec<ConferenceRecord>, ScrapeError> {
    let document = Html::parse_document(html);

    let table_selector = selector(TABLE_SELECTOR)?;
    let row_selector = selector(ROW_SELECTOR)?;
    let cell_selector = selector("td")?;
    let title_selector = selector(TITLE_CELL_SELECTOR)?;
    let link_selector = selector("a")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ScrapeError::TableNotFound)?;

    let category_display = display_category(category);
    let location_display = display_location(place);

    let mut records = Vec::new();
    for (index, row) in table.select(&row_selector).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

        let date_cell = cells
            .first()
            .ok_or(ScrapeError::MalformedRow { index, part: "date cell" })?;
        let title_cell = row
            .select(&title_selector)
            .next()
            .ok_or(ScrapeError::MalformedRow { index, part: "title cell" })?;
        let link = title_cell
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ScrapeError::MalformedRow { index, part: "title link" })?;
        let venue_cell = cells
            .get(2)
            .ok_or(ScrapeError::MalformedRow { index, part: "venue cell" })?;

        records.push(ConferenceRecord {
            date: cell_text(date_cell),
            title: cell_text(&title_cell),
            venue: cell_text(venue_cell),
            link: link.trim().to_string(),
            category: category_display.clone(),
            location: location_display.clone(),
        });
    }

    tracing::debug!("Parsed {} conference rows", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <table class="table table-striped">
          <tr><th>Date</th><th>Conference</th><th>Venue</th></tr>
          <tr class="data1">
            <td>24th Oct</td>
            <td style="text-align: left"><a href="https://example.org/event/1">International Conference on Robotics</a></td>
            <td>Alexandria, Egypt</td>
          </tr>
          <tr class="data1">
            <td> 02nd
                Nov </td>
            <td style="text-align: left">
              <a href="https://example.org/event/2"><b>World</b> Congress on Materials</a>
            </td>
            <td>Alexandria,   Egypt</td>
          </tr>
          <tr class="ad"><td colspan="3">Sponsored</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parses_all_data_rows() {
        let records =
            parse_conference_table(LISTING, "engineering-and-technology", "alexandria").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_field_values() {
        let records =
            parse_conference_table(LISTING, "engineering-and-technology", "alexandria").unwrap();

        let first = &records[0];
        assert_eq!(first.date, "24th Oct");
        assert_eq!(first.title, "International Conference on Robotics");
        assert_eq!(first.venue, "Alexandria, Egypt");
        assert_eq!(first.link, "https://example.org/event/1");
        assert_eq!(first.category, "Engineering And Technology");
        assert_eq!(first.location, "Alexandria");

        // Text nodes are joined with a space and whitespace runs collapsed, so
        // `<b>World</b> Congress` reads "World Congress" rather than the glued
        // "WorldCongress" a strip-and-concatenate extraction would give.
        let second = &records[1];
        assert_eq!(second.date, "02nd Nov");
        assert_eq!(second.title, "World Congress on Materials");
        assert_eq!(second.venue, "Alexandria, Egypt");
        assert_eq!(second.link, "https://example.org/event/2");
    }

    #[test]
    fn test_missing_table() {
        let html = "<html><body><p>Nothing scheduled</p></body></html>";
        assert!(matches!(
            parse_conference_table(html, "law", "cairo"),
            Err(ScrapeError::TableNotFound)
        ));
    }

    #[test]
    fn test_table_without_table_class_is_missing() {
        let html = r#"<table class="listing"><tr class="data1"><td>x</td></tr></table>"#;
        assert!(matches!(
            parse_conference_table(html, "law", "cairo"),
            Err(ScrapeError::TableNotFound)
        ));
    }

    #[test]
    fn test_empty_table() {
        let html = r#"<table class="table"><tr><th>Date</th></tr></table>"#;
        let records = parse_conference_table(html, "law", "cairo").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_only_first_table_is_read() {
        let html = r#"
            <table class="table">
              <tr class="data1"><td>1st Jan</td><td style="text-align: left"><a href="/a">A</a></td><td>Cairo</td></tr>
            </table>
            <table class="table">
              <tr class="data1"><td>2nd Jan</td><td style="text-align: left"><a href="/b">B</a></td><td>Giza</td></tr>
            </table>
        "#;
        let records = parse_conference_table(html, "law", "cairo").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_row_without_link() {
        let html = r#"
            <table class="table">
              <tr class="data1"><td>1st Jan</td><td style="text-align: left">No link</td><td>Cairo</td></tr>
            </table>
        "#;
        let err = parse_conference_table(html, "law", "cairo").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedRow { index: 0, part: "title link" }));
    }

    #[test]
    fn test_row_without_venue() {
        let html = r#"
            <table class="table">
              <tr class="data1"><td>1st Jan</td><td style="text-align: left"><a href="/a">A</a></td></tr>
            </table>
        "#;
        let err = parse_conference_table(html, "law", "cairo").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedRow { index: 0, part: "venue cell" }));
    }
}

//! Conference slug utilities
//!
//! The listing site addresses pages as `/{category}/{place}.html`, where both
//! segments are lowercase hyphenated slugs.

/// Title-case a string: the first letter of every run of letters is
/// upper-cased and the rest of the run lower-cased. Any non-letter starts a
/// new run.
///
/// # Examples
/// ```
/// use confscrape::utils::title_case;
///
/// assert_eq!(title_case("engineering and technology"), "Engineering And Technology");
/// assert_eq!(title_case("new-york"), "New-York");
/// assert_eq!(title_case("SAN FRANCISCO"), "San Francisco");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Display form of a place slug (e.g., "alexandria" -> "Alexandria")
///
/// Hyphens are kept: "new-york" -> "New-York".
pub fn display_location(place: &str) -> String {
    title_case(place)
}

/// Display form of a category slug with hyphens turned into spaces
pub fn display_category(category: &str) -> String {
    title_case(&category.replace('-', " "))
}

/// A place slug must be a single path segment: ASCII letters, digits, `-`, `_`
///
/// # Examples
/// ```
/// use confscrape::utils::is_valid_place_slug;
///
/// assert!(is_valid_place_slug("alexandria"));
/// assert!(is_valid_place_slug("new-york"));
/// assert!(!is_valid_place_slug("../admin"));
/// assert!(!is_valid_place_slug(""));
/// ```
pub fn is_valid_place_slug(place: &str) -> bool {
    !place.is_empty()
        && place
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Build the listing URL for a category and place
///
/// # Examples
/// ```
/// use confscrape::utils::make_listing_url;
///
/// assert_eq!(
///     make_listing_url("https://allconferencealert.com", "law", "cairo"),
///     "https://allconferencealert.com/law/cairo.html"
/// );
/// ```
pub fn make_listing_url(base_url: &str, category: &str, place: &str) -> String {
    format!("{}/{}/{}.html", base_url.trim_end_matches('/'), category, place)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("engineering and technology"), "Engineering And Technology");
        assert_eq!(title_case("law"), "Law");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_lowercases_rest() {
        assert_eq!(title_case("ALEXANDRIA"), "Alexandria");
        assert_eq!(title_case("mIxEd cAsE"), "Mixed Case");
    }

    #[test]
    fn test_title_case_non_letters_split_words() {
        assert_eq!(title_case("new-york"), "New-York");
        assert_eq!(title_case("st_louis"), "St_Louis");
        assert_eq!(title_case("2nd city"), "2Nd City");
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("business-and-economics"), "Business And Economics");
        assert_eq!(display_category("education"), "Education");
    }

    #[test]
    fn test_display_location_keeps_hyphens() {
        assert_eq!(display_location("alexandria"), "Alexandria");
        assert_eq!(display_location("kuala-lumpur"), "Kuala-Lumpur");
    }

    #[test]
    fn test_place_slug_validation() {
        assert!(is_valid_place_slug("cairo"));
        assert!(is_valid_place_slug("sharm_el_sheikh"));
        assert!(is_valid_place_slug("dubai2"));
        assert!(!is_valid_place_slug("cairo/egypt"));
        assert!(!is_valid_place_slug("cairo.html"));
        assert!(!is_valid_place_slug("cairo?x=1"));
        assert!(!is_valid_place_slug("new york"));
    }

    #[test]
    fn test_make_listing_url_trims_trailing_slash() {
        assert_eq!(
            make_listing_url("http://localhost:8080/", "education", "alexandria"),
            "http://localhost:8080/education/alexandria.html"
        );
    }
}

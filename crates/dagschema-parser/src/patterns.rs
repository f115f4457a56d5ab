//! Regexes and keyword tables used to recognize schedule lines.

use chrono::Weekday;
use dagschema_models::Category;
use regex::Regex;
use std::sync::LazyLock;

/// Time range such as `8:00-16:30` or `07:30 - 15:30`.
///
/// Unanchored: suffixes like `16:00uur` and digits glued to the address
/// still match.
pub(crate) static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})").expect("Invalid time range regex")
});

/// Assistant annotation in square brackets, e.g. `[assist]`.
pub(crate) static ASSIST_BRACKET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[[^\]]*assist[^\]]*\]").expect("Invalid assist bracket regex")
});

/// Assistant annotation in parentheses, e.g. `(assist coordination)`.
pub(crate) static ASSIST_PAREN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\([^)]*assist[^)]*\)").expect("Invalid assist paren regex")
});

/// Bare `assist` word; everything after it on the line is annotation too.
pub(crate) static ASSIST_BARE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bassist.*$").expect("Invalid bare assist regex"));

/// Absence keywords in Dutch and English.
pub(crate) static ABSENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)afwezig|absent").expect("Invalid absence regex"));

/// Marker that makes a line a header rather than content (covers `dagschema`).
pub(crate) const HEADER_MARKER: &str = "schema";

/// Category keywords, checked in this order; the first hit wins.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Materials, &["materiaal", "material", "materials"]),
    (
        Category::Storingen,
        &["storing", "storingen", "emergency", "urgent"],
    ),
    (Category::Specials, &["special", "specials", "bijzonder", "extra"]),
];

/// Dutch weekday names.
pub const WEEKDAYS: &[(&str, Weekday)] = &[
    ("maandag", Weekday::Mon),
    ("dinsdag", Weekday::Tue),
    ("woensdag", Weekday::Wed),
    ("donderdag", Weekday::Thu),
    ("vrijdag", Weekday::Fri),
    ("zaterdag", Weekday::Sat),
    ("zondag", Weekday::Sun),
];

/// Classifies a block address by keyword.
pub fn classify_category(address: &str) -> Category {
    let lower = address.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Returns the first Dutch weekday named in the text, if any.
pub fn find_weekday(text: &str) -> Option<Weekday> {
    let lower = text.to_lowercase();
    WEEKDAYS
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, day)| *day)
}

/// Returns true if the text mentions an absence keyword.
pub fn mentions_absence(text: &str) -> bool {
    ABSENCE_REGEX.is_match(text)
}

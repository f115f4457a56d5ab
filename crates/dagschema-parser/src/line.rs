//! Line classification.
//!
//! Every trimmed, non-blank line of a schedule is exactly one [`LineKind`].
//! Classification priority is header, time range, worker, absence, other.

use dagschema_models::{ParsedWorker, UNKNOWN_ADDRESS};

use crate::patterns::{
    mentions_absence, ABSENCE_REGEX, ASSIST_BARE_REGEX, ASSIST_BRACKET_REGEX, ASSIST_PAREN_REGEX,
    HEADER_MARKER, TIME_RANGE_REGEX,
};

/// Address and times captured from a block header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRangeLine {
    pub address: String,
    /// `None` when the start clock value is out of range.
    pub start_time: Option<String>,
    /// `None` when the end clock value is out of range.
    pub end_time: Option<String>,
}

/// What a single schedule line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Title line such as `Dagschema maandag`.
    Header,
    /// Opens a new block.
    TimeRange(TimeRangeLine),
    /// Crew member for the open block; `None` if nothing remained after stripping.
    Worker(Option<ParsedWorker>),
    /// Absent worker; `None` if nothing remained after stripping.
    Absence(Option<String>),
    /// Anything else.
    Other,
}

/// Classifies one trimmed line.
pub fn classify(line: &str) -> LineKind {
    if line.to_lowercase().contains(HEADER_MARKER) {
        return LineKind::Header;
    }

    if let Some(range) = parse_time_range(line) {
        return LineKind::TimeRange(range);
    }

    if let Some(rest) = line.strip_prefix('-') {
        return LineKind::Worker(parse_worker(rest));
    }

    if mentions_absence(line) {
        return LineKind::Absence(parse_absence(line));
    }

    LineKind::Other
}

fn parse_time_range(line: &str) -> Option<TimeRangeLine> {
    let caps = TIME_RANGE_REGEX.captures(line)?;
    let matched = caps.get(0)?;

    let address = line[..matched.start()]
        .trim()
        .trim_end_matches([':', ',', '-'])
        .trim_end();
    let address = if address.is_empty() {
        UNKNOWN_ADDRESS.to_string()
    } else {
        address.to_string()
    };

    Some(TimeRangeLine {
        address,
        start_time: clock(&caps[1], &caps[2]),
        end_time: clock(&caps[3], &caps[4]),
    })
}

/// Renders a zero-padded 24-hour `HH:MM`, rejecting out-of-range values.
fn clock(hours: &str, minutes: &str) -> Option<String> {
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(format!("{:02}:{:02}", h, m))
}

fn parse_worker(text: &str) -> Option<ParsedWorker> {
    let is_assistant = text.to_lowercase().contains("assist");

    let stripped = ASSIST_BRACKET_REGEX.replace_all(text, "");
    let stripped = ASSIST_PAREN_REGEX.replace_all(&stripped, "");
    let stripped = ASSIST_BARE_REGEX.replace_all(&stripped, "");

    let name = stripped
        .trim()
        .trim_end_matches(['.', ',', ';', ':'])
        .trim_end();
    if name.is_empty() {
        return None;
    }

    Some(ParsedWorker {
        name: name.to_string(),
        is_assistant,
    })
}

fn parse_absence(line: &str) -> Option<String> {
    let without_keywords = ABSENCE_REGEX.replace_all(line, "");
    let name: String = without_keywords
        .chars()
        .filter(|c| *c != '-' && *c != ':')
        .collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

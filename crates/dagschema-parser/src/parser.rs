//! Schedule text parser.
//!
//! Turns hand-typed schedule text such as:
//! ```text
//! Dagschema dinsdag
//! Hoofdstraat 123 Amsterdam 08:00-16:00:
//! - Jan de Vries
//! - Jane Smith [assist]
//! Afwezig: Peter van der Laan
//! ```
//! into a [`ParsedSchedule`]. Parsing never fails: lines that mean nothing
//! are skipped, and empty input yields an empty schedule.

use chrono::{Local, NaiveDate};
use dagschema_models::{
    Category, ParsedAbsence, ParsedSchedule, ParsedScheduleItem, ParsedWorker,
};
use tracing::debug;

use crate::line::{classify, LineKind, TimeRangeLine};
use crate::patterns::classify_category;
use crate::work_date::resolve_work_date;

/// The block currently being filled by worker lines.
#[derive(Debug)]
struct OpenBlock {
    address: String,
    category: Category,
    start_time: Option<String>,
    end_time: Option<String>,
    workers: Vec<ParsedWorker>,
}

impl OpenBlock {
    fn start(range: TimeRangeLine) -> Self {
        Self {
            category: classify_category(&range.address),
            address: range.address,
            start_time: range.start_time,
            end_time: range.end_time,
            workers: Vec::new(),
        }
    }

    /// Returns the finished item, or `None` if a required field is missing.
    fn finish(self) -> Option<ParsedScheduleItem> {
        if self.address.is_empty() {
            return None;
        }
        Some(ParsedScheduleItem {
            address: self.address,
            category: self.category,
            start_time: self.start_time?,
            end_time: self.end_time?,
            workers: self.workers,
        })
    }
}

/// Parses schedule text, resolving weekdays relative to the local date.
pub fn parse(raw: &str) -> ParsedSchedule {
    parse_with_today(raw, Local::now().date_naive())
}

/// Parses schedule text, resolving weekdays relative to `today`.
pub fn parse_with_today(raw: &str, today: NaiveDate) -> ParsedSchedule {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let work_date = resolve_work_date(lines.iter().copied(), today);

    let mut items = Vec::new();
    let mut absences = Vec::new();
    let mut current: Option<OpenBlock> = None;
    let mut dropped_workers = 0usize;

    for line in &lines {
        match classify(line) {
            LineKind::Header | LineKind::Other => {}
            LineKind::TimeRange(range) => {
                if let Some(item) = current.take().and_then(OpenBlock::finish) {
                    items.push(item);
                }
                current = Some(OpenBlock::start(range));
            }
            LineKind::Worker(worker) => match (current.as_mut(), worker) {
                (Some(block), Some(worker)) => block.workers.push(worker),
                (None, Some(_)) => dropped_workers += 1,
                (_, None) => {}
            },
            LineKind::Absence(Some(name)) => absences.push(ParsedAbsence::new(name)),
            LineKind::Absence(None) => {}
        }
    }

    if let Some(item) = current.and_then(OpenBlock::finish) {
        items.push(item);
    }

    let schedule = ParsedSchedule {
        work_date,
        items,
        absences,
    };

    debug!(
        work_date = %schedule.work_date,
        items = schedule.items.len(),
        workers = schedule.worker_count(),
        absences = schedule.absences.len(),
        dropped_workers,
        "Parsed daily schedule"
    );

    schedule
}

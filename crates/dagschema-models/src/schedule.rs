//! Parsed daily schedule types.
//!
//! A schedule is one working day: a list of blocks (an address, a time
//! slot and the crew working there) plus the workers reported absent.
//! Field names serialize in camelCase so the JSON matches what the web
//! front end exchanges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address used when a time-range line carries no address text.
pub const UNKNOWN_ADDRESS: &str = "Unknown Address";

/// Kind of work a block represents, derived from its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Regular project work.
    #[default]
    Normal,
    /// Material pickup or depot work.
    Materials,
    /// Breakdowns and emergency call-outs.
    Storingen,
    /// Special or extra jobs.
    Specials,
}

impl Category {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Materials => "materials",
            Category::Storingen => "storingen",
            Category::Specials => "specials",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worker's appearance in one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorker {
    /// Worker name with any assistant annotation removed.
    pub name: String,
    /// Whether the line marked this worker as an assistant.
    pub is_assistant: bool,
}

impl ParsedWorker {
    /// Creates a regular crew member.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_assistant: false,
        }
    }

    /// Creates an assisting crew member.
    pub fn assistant(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_assistant: true,
        }
    }
}

/// One address / time-slot entry for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedScheduleItem {
    /// Location text as written before the time range.
    pub address: String,
    /// Category derived from keywords in the address.
    pub category: Category,
    /// Start time, zero-padded `HH:MM`.
    pub start_time: String,
    /// End time, zero-padded `HH:MM`.
    pub end_time: String,
    /// Crew for this block, in input order.
    #[serde(default)]
    pub workers: Vec<ParsedWorker>,
}

impl ParsedScheduleItem {
    /// Returns the number of assistants in this block.
    pub fn assistant_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_assistant).count()
    }
}

/// A worker marked absent for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAbsence {
    /// Name of the absent worker.
    pub worker_name: String,
    /// Reason for the absence. The parser never fills this in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ParsedAbsence {
    /// Creates an absence without a reason.
    pub fn new(worker_name: impl Into<String>) -> Self {
        Self {
            worker_name: worker_name.into(),
            reason: None,
        }
    }
}

/// The full result of parsing one day's schedule text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSchedule {
    /// Day the schedule applies to.
    pub work_date: NaiveDate,
    /// Completed blocks, in input order.
    #[serde(default)]
    pub items: Vec<ParsedScheduleItem>,
    /// Absences, in input order.
    #[serde(default)]
    pub absences: Vec<ParsedAbsence>,
}

impl ParsedSchedule {
    /// Creates an empty schedule for the given day.
    pub fn empty(work_date: NaiveDate) -> Self {
        Self {
            work_date,
            items: Vec::new(),
            absences: Vec::new(),
        }
    }

    /// Returns true if the schedule has neither blocks nor absences.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.absences.is_empty()
    }

    /// Total worker appearances across all blocks.
    pub fn worker_count(&self) -> usize {
        self.items.iter().map(|item| item.workers.len()).sum()
    }

    /// Every worker name that appears, in rosters first and then absences.
    ///
    /// Names are returned as written; duplicates are kept.
    pub fn all_worker_names(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .flat_map(|item| item.workers.iter().map(|w| w.name.as_str()))
            .chain(self.absences.iter().map(|a| a.worker_name.as_str()))
    }
}

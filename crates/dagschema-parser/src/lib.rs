//! Parser for free-text Dutch daily work schedules.
//!
//! Crew leads paste or type a day's planning as loose text: a weekday
//! header, one line per location with a time range, dash-prefixed crew
//! lines and absence notes. This crate turns that text into a
//! [`ParsedSchedule`](dagschema_models::ParsedSchedule).
//!
//! # Key Concepts
//!
//! - **LineKind**: every line is classified once (header, time range,
//!   worker, absence, other)
//! - **Block**: a time-range line opens a block; worker lines fill it
//! - **Keyword tables**: categories and weekdays are table lookups
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dagschema_models::Category;
//! use dagschema_parser::parse_with_today;
//!
//! let text = "Dagschema maandag\nStoring Nieuwegein 10:00-14:00:\n- Henk Jansen";
//! let today = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
//! let schedule = parse_with_today(text, today);
//!
//! assert_eq!(schedule.work_date, NaiveDate::from_ymd_opt(2026, 10, 26).unwrap());
//! assert_eq!(schedule.items[0].category, Category::Storingen);
//! assert_eq!(schedule.items[0].workers[0].name, "Henk Jansen");
//! ```

pub mod line;
pub mod parser;
pub mod patterns;
pub mod work_date;

pub use line::{classify, LineKind, TimeRangeLine};
pub use parser::{parse, parse_with_today};
pub use patterns::{classify_category, find_weekday, CATEGORY_KEYWORDS, WEEKDAYS};
pub use work_date::{date_for_weekday, next_monday, resolve_work_date};

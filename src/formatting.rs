use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use color_eyre::{Result, eyre::eyre};

use crate::schedule::parse_start_time;

/// `EEEE MMMM, d, y 'at' h:mma`
const FULL_PATTERN: &str = "%A %B, %-d, %Y at %-I:%M%p";
/// `EE MM, dd, y h:mma`
const MEDIUM_PATTERN: &str = "%a %m, %d, %Y %-I:%M%p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat<'a> {
    Full,
    Medium,
    /// Any other keyword is used as a strftime pattern as-is
    Pattern(&'a str),
}

impl<'a> DateFormat<'a> {
    pub fn from_keyword(keyword: &'a str) -> Self {
        match keyword {
            "full" => DateFormat::Full,
            "medium" | "" => DateFormat::Medium,
            other => DateFormat::Pattern(other),
        }
    }

    fn pattern(&self) -> &'a str {
        match self {
            DateFormat::Full => FULL_PATTERN,
            DateFormat::Medium => MEDIUM_PATTERN,
            DateFormat::Pattern(pattern) => *pattern,
        }
    }
}

/// Render a stored timestamp for display, in `zone`.
pub fn format_datetime(value: &str, format: DateFormat<'_>, zone: Tz) -> Result<String> {
    let date = parse_start_time(value, zone)?.with_timezone(&zone);

    let pattern = format.pattern();
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(eyre!("Invalid date format pattern: '{}'", pattern));
    }

    Ok(date.format_with_items(items.iter()).to_string())
}

//! Dates as they are shown next to documents, e.g. `Oct 19' 26`.
use chrono::{Local, NaiveDate};

/// Format `date` the way document records display it.
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d' %y").to_string()
}

/// Today's date in the local timezone, display formatted.
#[must_use]
pub fn today() -> String {
    display_date(Local::now().date_naive())
}

use chrono::{Datelike, Local, Months, NaiveDate};
use url::form_urlencoded;

use crate::filters::{END_DATE_KEY, START_DATE_KEY};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last calendar day of the month containing `today`.
pub fn month_range(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whether a `location.search` string already carries a date filter.
/// A key counts even when its value is empty.
pub fn has_date_filter(search: &str) -> bool {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .any(|(key, _)| key == START_DATE_KEY || key == END_DATE_KEY)
}

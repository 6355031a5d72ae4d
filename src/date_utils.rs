use chrono::{Datelike, NaiveDate};

/// Calendar month identifier. Ordered tuples sort chronologically, so a
/// `BTreeMap<MonthKey, _>` iterates months oldest-first without a separate
/// sort step.
pub type MonthKey = (i32, u32);

pub fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month())
}

pub fn format_month_key(key: MonthKey) -> String {
    format!("{}-{}", key.0, key.1)
}

/// Parse a stored expense date (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn same_month(date: NaiveDate, other: NaiveDate) -> bool {
    date.year() == other.year() && date.month() == other.month()
}

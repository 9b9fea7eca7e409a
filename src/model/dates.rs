use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Month};

const WIRE_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    // Some backends send full timestamps; only the calendar date matters.
    let s = s.get(..10).unwrap_or(s);
    Date::parse(s, WIRE_DATE)
}

pub fn format_date(date: Date) -> String {
    date.format(WIRE_DATE)
        .unwrap_or_else(|_| date.to_string())
}

/// Same calendar day one year later; Feb 29 becomes Feb 28.
pub fn add_one_year(date: Date) -> Date {
    let year = date.year() + 1;
    Date::from_calendar_date(year, date.month(), date.day())
        .or_else(|_| Date::from_calendar_date(year, Month::February, 28))
        .unwrap_or(date)
}

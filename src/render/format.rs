//! Text formatting shared by the card renderers and the modals.

use chrono::{NaiveDate, NaiveDateTime};

const MONTHS_SHORT: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Number of distinct entry-animation delays (`animate__delay-0s` ..`-2s`).
const STAGGER_STEPS: usize = 3;

/// `"HH:MM"` (24h) to `"H:MM AM"` (12h).
///
/// The minute part is passed through as written. Input that does not look
/// like `hour:minute` comes back unchanged.
pub fn format_time(time: &str) -> String {
    let mut parts = time.split(':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return time.to_string();
    };
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };

    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minutes} {suffix}")
}

/// Cut `text` to at most `max` characters, appending `...` when anything was cut.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Day number and three-letter month shown on an event card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBadge {
    pub day: u32,
    pub month: &'static str,
}

/// Badge for an event starting at `{date}T{start_time}`.
///
/// Falls back to the bare date when the start time is unusable.
pub fn date_badge(date: &str, start_time: &str) -> Option<DateBadge> {
    use chrono::Datelike;

    let day = parse_stamp(date, start_time)
        .map(|dt| dt.date())
        .or_else(|| parse_iso_date(date))?;
    Some(DateBadge {
        day: day.day(),
        month: MONTHS_SHORT[day.month0() as usize],
    })
}

/// `"2024-03-15"` to `"March 15, 2024"`. Unparsable dates are returned as written.
pub fn format_long_date(date: &str) -> String {
    match parse_iso_date(date) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// US short date, e.g. `3/15/2024`.
pub fn format_us_date(dt: &NaiveDateTime) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}

/// US time of day with seconds, e.g. `9:00:00 AM`.
pub fn format_us_time(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M:%S %p").to_string()
}

/// Local timestamp from an ISO date and an `HH:MM` (or `HH:MM:SS`) time.
pub fn parse_stamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let stamp = format!("{}T{}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Parse a joined `{date}T{time}` stamp as produced for the calendar widget.
pub fn parse_joined_stamp(stamp: &str) -> Option<NaiveDateTime> {
    let (date, time) = stamp.split_once('T')?;
    parse_stamp(date, time)
}

fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Entry-animation delay class for the card at `index`.
///
/// Only the first `limit` cards are staggered; the delay cycles through
/// three steps.
pub fn stagger_class(index: usize, limit: usize) -> Option<String> {
    (index < limit).then(|| format!("animate__delay-{}s", index % STAGGER_STEPS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_covers_the_clock() {
        assert_eq!(format_time("0:00"), "12:00 AM");
        assert_eq!(format_time("00:15"), "12:15 AM");
        assert_eq!(format_time("09:00"), "9:00 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("13:30"), "1:30 PM");
        assert_eq!(format_time("23:59"), "11:59 PM");
    }

    #[test]
    fn format_time_keeps_minutes_verbatim_and_ignores_junk() {
        assert_eq!(format_time("14:5"), "2:5 PM");
        assert_eq!(format_time("10:30:00"), "10:30 AM");
        assert_eq!(format_time("noon"), "noon");
        assert_eq!(format_time("xx:30"), "xx:30");
        assert_eq!(format_time(""), "");
    }

    #[test]
    fn truncate_text_hard_cut() {
        assert_eq!(truncate_text("short", 120), "short");

        let long = "a".repeat(130);
        let cut = truncate_text(&long, 120);
        assert_eq!(cut.len(), 123);
        assert!(cut.starts_with(&"a".repeat(120)));
        assert!(cut.ends_with("..."));

        let exact = "b".repeat(120);
        assert_eq!(truncate_text(&exact, 120), exact);
    }

    #[test]
    fn truncate_text_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(truncate_text(&text, 3), "ééé...");
    }

    #[test]
    fn date_badge_from_date_and_time() {
        let badge = date_badge("2024-03-15", "09:00").unwrap();
        assert_eq!(badge.day, 15);
        assert_eq!(badge.month, "MAR");

        let date_only = date_badge("2024-12-01", "").unwrap();
        assert_eq!(date_only.month, "DEC");

        assert_eq!(date_badge("soon", "09:00"), None);
    }

    #[test]
    fn long_and_us_dates() {
        assert_eq!(format_long_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_long_date("TBD"), "TBD");

        let dt = parse_joined_stamp("2024-03-15T13:05").unwrap();
        assert_eq!(format_us_date(&dt), "3/15/2024");
        assert_eq!(format_us_time(&dt), "1:05:00 PM");
        assert_eq!(parse_joined_stamp("2024-03-15T"), None);
    }

    #[test]
    fn stagger_classes() {
        assert_eq!(stagger_class(0, 3).as_deref(), Some("animate__delay-0s"));
        assert_eq!(stagger_class(2, 3).as_deref(), Some("animate__delay-2s"));
        assert_eq!(stagger_class(3, 3), None);
        assert_eq!(stagger_class(3, 4).as_deref(), Some("animate__delay-0s"));
        assert_eq!(stagger_class(4, 4), None);
    }
}

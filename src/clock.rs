use chrono::{DateTime, Local, TimeZone};

/// Formats a wall-clock time the way the receive/handover buttons stamp it,
/// e.g. `3:07 PM`.
pub fn format_clock_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format("%-I:%M %p").to_string()
}

/// Current local time, formatted for the form
pub fn now_clock_time() -> String {
    format_clock_time(&Local::now())
}

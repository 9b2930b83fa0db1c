use chrono::{Datelike, NaiveDate};

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sunday-first, indexed by `num_days_from_sunday`.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Column headers of the Monday-first grid.
pub const WEEK_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Shown in the text field while nothing is selected.
pub const EMPTY_FIELD: &str = "-- -- --";

/// Abbreviation for a 1-based month; unknown months read as "Jan".
pub fn month_abbreviation(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .unwrap_or(MONTH_ABBREVIATIONS[0])
}

/// Abbreviation for a 0 (Sunday) .. 6 weekday; unknown values read as "Mon".
pub fn weekday_abbreviation(day_of_week: u32) -> &'static str {
    WEEKDAY_ABBREVIATIONS
        .get(day_of_week as usize)
        .copied()
        .unwrap_or(WEEKDAY_ABBREVIATIONS[1])
}

/// `05 Mar 24`, or an empty string.
pub fn format_short(date: Option<NaiveDate>) -> String {
    date.map(|d| {
        format!(
            "{:02} {} {:02}",
            d.day(),
            month_abbreviation(d.month()),
            d.year().rem_euclid(100)
        )
    })
    .unwrap_or_default()
}

/// Value of the picker's text field.
pub fn format_field(selected: Option<NaiveDate>) -> String {
    match selected {
        Some(_) => format_short(selected),
        None => EMPTY_FIELD.to_string(),
    }
}

/// `Tue Mar 05 2024`
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{} {} {:02} {:04}",
        weekday_abbreviation(date.weekday().num_days_from_sunday()),
        month_abbreviation(date.month()),
        date.day(),
        date.year()
    )
}

/// Title of the popover, e.g. `Mar 2024`.
pub fn visible_month_label(date: NaiveDate) -> String {
    format!("{} {}", month_abbreviation(date.month()), date.year())
}

/// Storage key for a picker label: trimmed, lowercased, spaces to hyphens.
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().split(' ').collect::<Vec<_>>().join("-")
}

use crate::domain::{DatePickerError, DatePickerResult};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Number of columns in a rendered week row.
pub const DAYS_PER_WEEK: usize = 7;

/// A real day of the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Day {
    /// 1-based day of the month
    pub day_index: u32,
    /// 0 (Sunday) .. 6 (Saturday)
    pub day_of_week: u32,
    pub full_date: NaiveDate,
    pub is_today: bool,
}

/// One position of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCell {
    /// Padding before the first day of the month. Not interactive.
    Blank,
    Day(Day),
}

impl DayCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }

    pub fn day(&self) -> Option<&Day> {
        match self {
            DayCell::Day(day) => Some(day),
            DayCell::Blank => None,
        }
    }

    pub fn day_index(&self) -> Option<u32> {
        self.day().map(|d| d.day_index)
    }

    pub fn day_of_week(&self) -> Option<u32> {
        self.day().map(|d| d.day_of_week)
    }

    pub fn full_date(&self) -> Option<NaiveDate> {
        self.day().map(|d| d.full_date)
    }

    pub fn is_today(&self) -> bool {
        self.day().is_some_and(|d| d.is_today)
    }

    /// Whether this cell shows `selected`. Compared by calendar fields, so a
    /// selection rebuilt from year/month/day still matches.
    pub fn is_selected(&self, selected: Option<NaiveDate>) -> bool {
        match (self.full_date(), selected) {
            (Some(date), Some(selected)) => same_day(date, selected),
            _ => false,
        }
    }
}

/// Year/month/day equality, independent of how either date was produced.
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Length of `month` (1-12) in `year`: the day before the first of the
/// following month.
pub fn days_in_month(year: i32, month: u32) -> DatePickerResult<u32> {
    first_of_month(year, month)?
        .checked_add_months(Months::new(1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .ok_or(DatePickerError::DateOutOfRange)
}

/// Weekday of the first of the month, 0 (Sunday) .. 6 (Saturday).
pub fn first_week_day(year: i32, month: u32) -> DatePickerResult<u32> {
    first_of_month(year, month).map(|first| first.weekday().num_days_from_sunday())
}

/// Blank cells before day 1 of a Monday-first grid.
///
/// A month starting on Sunday gets a whole blank row and day 1 opens the
/// second row. That is the only case with seven blanks, and the only one in
/// which a day's column differs from its Monday-first weekday.
pub fn leading_padding(first_week_day: u32) -> usize {
    if first_week_day == 0 {
        DAYS_PER_WEEK
    } else {
        (first_week_day - 1) as usize
    }
}

/// Monday-first column (0-6) of a Sunday-first weekday index.
pub fn monday_first_column(day_of_week: u32) -> usize {
    ((day_of_week + 6) % 7) as usize
}

/// Builds the cells of the month containing `reference`.
///
/// The result is `padding + days_in_month` cells long; the last row is not
/// filled up. Only the year and month of `reference` matter.
pub fn build_month_grid(reference: NaiveDate, today: NaiveDate) -> Vec<DayCell> {
    let year = reference.year();
    let month = reference.month();
    // Only the final December chrono can represent has no successor month.
    let length = days_in_month(year, month).unwrap_or(31);
    let first = reference - chrono::Duration::days(i64::from(reference.day() - 1));
    let padding = leading_padding(first.weekday().num_days_from_sunday());

    let mut cells = Vec::with_capacity(padding + length as usize);
    cells.extend(std::iter::repeat_n(DayCell::Blank, padding));
    cells.extend(first.iter_days().take(length as usize).map(|date| {
        DayCell::Day(Day {
            day_index: date.day(),
            day_of_week: date.weekday().num_days_from_sunday(),
            full_date: date,
            is_today: same_day(date, today),
        })
    }));
    cells
}

/// Same as [`build_month_grid`] from raw year/month parts.
pub fn build_month_grid_for(
    year: i32,
    month: u32,
    today: NaiveDate,
) -> DatePickerResult<Vec<DayCell>> {
    let first = first_of_month(year, month)?;
    Ok(build_month_grid(first, today))
}

/// Splits a flat grid into rows of seven cells. The last row may be short.
pub fn weeks(cells: &[DayCell]) -> std::slice::Chunks<'_, DayCell> {
    cells.chunks(DAYS_PER_WEEK)
}

fn first_of_month(year: i32, month: u32) -> DatePickerResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(DatePickerError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(DatePickerError::InvalidYear(year))
}

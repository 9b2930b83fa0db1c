use crate::domain::{DatePickerError, DatePickerResult, days_in_month};
use chrono::{Datelike, Months, NaiveDate};

/// Years offered by the year selector unless configured otherwise.
pub const DEFAULT_YEAR_WINDOW: u32 = 80;

/// Moves `date` by `delta` months. Years roll over in both directions and the
/// day is clamped to the length of the target month.
pub fn shift_months(date: NaiveDate, delta: i32) -> DatePickerResult<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.ok_or(DatePickerError::DateOutOfRange)
}

pub fn previous_month(date: NaiveDate) -> DatePickerResult<NaiveDate> {
    shift_months(date, -1)
}

pub fn next_month(date: NaiveDate) -> DatePickerResult<NaiveDate> {
    shift_months(date, 1)
}

/// Replaces the month (1-12), keeping year and day.
pub fn with_month(date: NaiveDate, month: u32) -> DatePickerResult<NaiveDate> {
    clamped_date(date.year(), month, date.day())
}

/// Replaces the year, keeping month and day.
pub fn with_year(date: NaiveDate, year: i32) -> DatePickerResult<NaiveDate> {
    clamped_date(year, date.month(), date.day()).map_err(|err| match err {
        DatePickerError::DateOutOfRange => DatePickerError::InvalidYear(year),
        other => other,
    })
}

/// Normalizes a zero-based month index that may run past either end of the
/// year, e.g. `(2024, -1)` is December 2023 and `(2024, 12)` is January 2025.
pub fn month_from_index(year: i32, index: i32) -> (i32, u32) {
    let year = year + index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Applies a raw zero-based month index to `date`, with the same rollover as
/// [`month_from_index`].
pub fn with_month_index(date: NaiveDate, index: i32) -> DatePickerResult<NaiveDate> {
    let (year, month) = month_from_index(date.year(), index);
    clamped_date(year, month, date.day())
}

fn clamped_date(year: i32, month: u32, day: u32) -> DatePickerResult<NaiveDate> {
    let day = day.min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DatePickerError::InvalidDate {
        year,
        month,
        day,
    })
}

/// Trailing range of years offered by the year selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub last: i32,
    pub length: u32,
}

impl YearWindow {
    pub fn ending_at(today: NaiveDate, length: u32) -> Self {
        Self {
            last: today.year(),
            length: length.max(1),
        }
    }

    pub fn first(&self) -> i32 {
        self.last - (self.length as i32 - 1)
    }

    /// Newest first, the order the selector lists them in.
    pub fn years(&self) -> Vec<i32> {
        (self.first()..=self.last).rev().collect()
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first()..=self.last).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.first(), self.last)
    }
}

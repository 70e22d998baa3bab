use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A booked day at day precision. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDate {
    day: u32,
    month: u32,
    year: i32,
}

impl CalendarDate {
    /// Returns `None` unless the triple names a real calendar day.
    pub fn new(day: u32, month: u32, year: i32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, day).map(Self::from_naive)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month0(),
            year: date.year(),
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    PrevMonth,
    CurrentMonth,
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day_number: u32,
    pub placement: Placement,
    pub is_booked: bool,
}

impl DayCell {
    fn outside(day_number: u32, placement: Placement) -> Self {
        Self {
            day_number,
            placement,
            is_booked: false,
        }
    }
}

/// Days the current user has a reservation on. Built in one go from a
/// source fetch and replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDateSet {
    dates: HashSet<CalendarDate>,
}

impl BookedDateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, day: u32, month: u32, year: i32) -> bool {
        self.dates.contains(&CalendarDate { day, month, year })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarDate> {
        self.dates.iter()
    }

    /// Chronological snapshot of the set.
    pub fn sorted(&self) -> Vec<CalendarDate> {
        let mut dates: Vec<_> = self.dates.iter().copied().collect();
        dates.sort_by_key(|date| (date.year, date.month, date.day));
        dates
    }
}

impl FromIterator<CalendarDate> for BookedDateSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// The month currently on screen. The month is kept in 0..=11 at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarViewState {
    displayed_year: i32,
    displayed_month: u32,
}

impl CalendarViewState {
    /// Builds a state from any month offset, carrying whole years over so
    /// that `new(2024, 12)` is January 2025 and `new(2024, -1)` December 2023.
    pub fn new(year: i32, month: i32) -> Self {
        Self {
            displayed_year: year + month.div_euclid(12),
            displayed_month: month.rem_euclid(12) as u32,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            displayed_year: date.year(),
            displayed_month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.displayed_year
    }

    pub fn month(&self) -> u32 {
        self.displayed_month
    }

    pub fn advance(&mut self) {
        if self.displayed_month == 11 {
            self.displayed_month = 0;
            self.displayed_year += 1;
        } else {
            self.displayed_month += 1;
        }
    }

    pub fn retreat(&mut self) {
        if self.displayed_month == 0 {
            self.displayed_month = 11;
            self.displayed_year -= 1;
        } else {
            self.displayed_month -= 1;
        }
    }

    /// English month name and year, e.g. "January 2025".
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            MONTH_NAMES[self.displayed_month as usize], self.displayed_year
        )
    }
}

pub fn advance_month(state: CalendarViewState) -> CalendarViewState {
    let mut next = state;
    next.advance();
    next
}

pub fn retreat_month(state: CalendarViewState) -> CalendarViewState {
    let mut prev = state;
    prev.retreat();
    prev
}

/// Lays out the month as rows of seven cells starting on Sunday: the tail
/// of the previous month, every day of the month with its booked flag, then
/// the head of the next month up to the end of the last row.
///
/// # Panics
///
/// If the year is outside the range chrono can represent.
pub fn generate_grid(state: &CalendarViewState, booked: &BookedDateSet) -> Vec<DayCell> {
    let year = state.year();
    let month = state.month();

    let leading = first_weekday(year, month);
    let days = days_in_month(year, month);
    let prev = retreat_month(*state);
    let days_in_prev = days_in_month(prev.year(), prev.month());
    let trailing = (7 - (leading + days) % 7) % 7;

    let mut cells = Vec::with_capacity((leading + days + trailing) as usize);
    cells.extend(
        (days_in_prev - leading + 1..=days_in_prev)
            .map(|day| DayCell::outside(day, Placement::PrevMonth)),
    );
    cells.extend((1..=days).map(|day| DayCell {
        day_number: day,
        placement: Placement::CurrentMonth,
        is_booked: booked.contains(day, month, year),
    }));
    cells.extend((1..=trailing).map(|day| DayCell::outside(day, Placement::NextMonth)));
    cells
}

/// Weekday of the 1st, 0 = Sunday through 6 = Saturday.
pub fn first_weekday(year: i32, month: u32) -> u32 {
    month_start(year, month).weekday().num_days_from_sunday()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let start = month_start(year, month);
    let next = advance_month(CalendarViewState::new(year, month as i32));
    (month_start(next.year(), next.month()) - start).num_days() as u32
}

fn month_start(year: i32, month: u32) -> NaiveDate {
    assert!(month < 12, "month index {month} outside 0-11");
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| panic!("year {year} outside the supported calendar range"))
}

use chrono::{DateTime, Datelike, Month, NaiveDate, TimeZone};
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};
use crate::filter::WinnerFilter;
use crate::fridays::{self, first_of_month, month_of, shift_month};
use crate::winner::Winner;

/// The calendar page currently on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigableMonth {
    pub year: i32,
    pub month: Month,
}

impl NavigableMonth {
    pub fn new(year: i32, month: Month) -> Self {
        NavigableMonth { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        let (year, month) = month_of(date);
        NavigableMonth { year, month }
    }

    /// `None` when the year is outside chrono's range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    pub fn shifted(&self, delta: i32) -> Self {
        let (year, month) = shift_month(self.year, self.month, delta);
        NavigableMonth { year, month }
    }
}

impl fmt::Display for NavigableMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month.number_from_month())
    }
}

impl FromStr for NavigableMonth {
    type Err = Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::new(
                ErrorKind::DateParse,
                &format!("'{}' is not a month, expected YYYY-MM", s),
            )
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month
            .parse::<u32>()
            .ok()
            .and_then(Month::from_u32)
            .ok_or_else(invalid)?;

        Ok(NavigableMonth { year, month })
    }
}

/// State behind the winner calendar: which month is shown and which Friday
/// is selected, bounded by `[min_date, max_date]`.
#[derive(Clone, Debug)]
pub struct WinnerCalendar {
    min_date: NaiveDate,
    max_date: NaiveDate,
    displayed: NavigableMonth,
    selected_day: Option<u32>,
    fridays: Vec<NaiveDate>,
}

impl WinnerCalendar {
    pub fn new<Tz: TimeZone>(now: &DateTime<Tz>, min_date: NaiveDate) -> Self {
        let max_date = fridays::most_recent_friday(now);

        let mut calendar = WinnerCalendar {
            min_date,
            max_date,
            displayed: NavigableMonth::of(max_date),
            selected_day: None,
            fridays: Vec::new(),
        };
        calendar.update_fridays();
        calendar
    }

    fn update_fridays(&mut self) {
        self.fridays = fridays::fridays_in_month(
            self.displayed.year,
            self.displayed.month,
            Some(self.max_date),
        );

        if self.selected_day.is_none() {
            self.selected_day = self.fridays.last().map(|d| d.day());
        }
    }

    /// Re-reads the clock. The last draw date may have moved on since
    /// construction.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let max_date = fridays::most_recent_friday(now);
        if max_date == self.max_date {
            return;
        }
        log::debug!("Latest draw moved from {} to {}", self.max_date, max_date);
        self.max_date = max_date;

        if self.displayed.first_day().map_or(true, |first| first > max_date) {
            self.displayed = NavigableMonth::of(max_date);
            self.selected_day = None;
        }
        if let Some(selected) = self.selected_date() {
            if selected > max_date {
                self.selected_day = None;
            }
        }
        self.update_fridays();
    }

    fn show(&mut self, month: NavigableMonth) {
        self.displayed = month;
        self.selected_day = None;
        self.update_fridays();
    }

    pub fn can_go_previous(&self) -> bool {
        fridays::can_go_to_previous_month(self.displayed.year, self.displayed.month, self.min_date)
    }

    pub fn can_go_next(&self) -> bool {
        fridays::can_go_to_next_month(self.displayed.year, self.displayed.month, self.max_date)
    }

    /// Returns `false` and leaves the calendar untouched at the lower bound.
    pub fn previous_month(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.show(self.displayed.shifted(-1));
        true
    }

    /// Returns `false` and leaves the calendar untouched at the upper bound.
    pub fn next_month(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.show(self.displayed.shifted(1));
        true
    }

    /// Jumps to `month` if it lies within the navigable range.
    pub fn goto_month(&mut self, month: NavigableMonth) -> bool {
        if month == self.displayed {
            return true;
        }
        match month.first_day() {
            Some(first) if first >= self.min_date && first <= self.max_date => {
                self.show(month);
                true
            }
            _ => false,
        }
    }

    fn is_selectable(&self, day: u32) -> bool {
        self.fridays.iter().any(|d| d.day() == day)
    }

    /// Selects one of the displayed Fridays. Any other day is ignored.
    pub fn select_day(&mut self, day: u32) -> bool {
        if !self.is_selectable(day) {
            log::debug!("Day {} is not a selectable Friday of {}", day, self.displayed);
            return false;
        }
        self.selected_day = Some(day);
        true
    }

    /// Selecting the already selected day falls back to the whole month.
    pub fn toggle_day(&mut self, day: u32) -> bool {
        if self.selected_day == Some(day) {
            self.selected_day = None;
            true
        } else {
            self.select_day(day)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_day = None;
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn displayed(&self) -> NavigableMonth {
        self.displayed
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.selected_day
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_day.and_then(|day| {
            NaiveDate::from_ymd_opt(
                self.displayed.year,
                self.displayed.month.number_from_month(),
                day,
            )
        })
    }

    pub fn fridays(&self) -> &[NaiveDate] {
        &self.fridays
    }

    pub fn filter(&self) -> WinnerFilter {
        WinnerFilter::default()
            .month(self.displayed.year, self.displayed.month)
            .day_opt(self.selected_day)
    }

    pub fn winners<'a>(&self, all: &'a [Winner]) -> Vec<&'a Winner> {
        self.filter().apply(all).collect()
    }
}

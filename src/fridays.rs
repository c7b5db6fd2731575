//! Calendar arithmetic for the weekly Friday draw.
//!
//! Everything in here is a pure function of its arguments. The current time is
//! always passed in by the caller, never read from the system clock.

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, TimeZone, Weekday};

/// Weekday on which winners are drawn.
pub const DRAW_WEEKDAY: Weekday = Weekday::Fri;

/// First day of `month`, or `None` for years chrono cannot represent.
pub fn first_of_month(year: i32, month: Month) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
}

pub fn days_of_month(year: i32, month: Month) -> Option<u32> {
    let (next_year, next_month) = shift_month(year, month, 1);
    let days = first_of_month(next_year, next_month)?
        .signed_duration_since(first_of_month(year, month)?)
        .num_days();
    Some(days as u32)
}

pub fn last_of_month(year: i32, month: Month) -> Option<NaiveDate> {
    let days = days_of_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month.number_from_month(), days)
}

/// Moves `delta` months forward (or backward when negative), rolling the year over.
pub fn shift_month(mut year: i32, mut month: Month, delta: i32) -> (i32, Month) {
    for _ in 0..delta.unsigned_abs() {
        if delta > 0 {
            if month == Month::December {
                year = year.saturating_add(1);
            }
            month = month.succ();
        } else {
            if month == Month::January {
                year = year.saturating_sub(1);
            }
            month = month.pred();
        }
    }
    (year, month)
}

/// Year and month a date belongs to.
pub fn month_of(date: NaiveDate) -> (i32, Month) {
    shift_month(date.year(), Month::January, date.month0() as i32)
}

pub fn last_weekday_on_or_before(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    date - Duration::days(back as i64)
}

/// Latest Friday on or before the local calendar date of `now`.
///
/// On a Friday this is `now`'s own date. The result carries no time of day.
pub fn most_recent_friday<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    last_weekday_on_or_before(now.date_naive(), DRAW_WEEKDAY)
}

pub fn can_go_to_previous_month(year: i32, month: Month, min_date: NaiveDate) -> bool {
    let (year, month) = shift_month(year, month, -1);
    first_of_month(year, month).map_or(false, |first| first >= min_date)
}

pub fn can_go_to_next_month(year: i32, month: Month, max_date: NaiveDate) -> bool {
    let (year, month) = shift_month(year, month, 1);
    first_of_month(year, month).map_or(false, |first| first <= max_date)
}

/// Iterator over the Fridays of a single month, ascending.
#[derive(Clone, Debug)]
pub struct Fridays {
    next: Option<NaiveDate>,
    until: NaiveDate,
}

impl Fridays {
    pub fn new(year: i32, month: Month, max_date: Option<NaiveDate>) -> Self {
        match first_of_month(year, month).zip(last_of_month(year, month)) {
            Some((first, last)) => {
                let offset = (7 + DRAW_WEEKDAY.num_days_from_monday()
                    - first.weekday().num_days_from_monday())
                    % 7;

                Fridays {
                    next: Some(first + Duration::days(offset as i64)),
                    until: max_date.map_or(last, |max| max.min(last)),
                }
            }
            None => Fridays {
                next: None,
                until: NaiveDate::MIN,
            },
        }
    }
}

impl Iterator for Fridays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next?;

        if date > self.until {
            self.next = None;
            return None;
        }

        self.next = date.checked_add_signed(Duration::weeks(1));
        Some(date)
    }
}

/// All Fridays of `month`, leaving out those strictly after `max_date`.
pub fn fridays_in_month(year: i32, month: Month, max_date: Option<NaiveDate>) -> Vec<NaiveDate> {
    Fridays::new(year, month, max_date).collect()
}

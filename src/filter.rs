use chrono::{Datelike, Month, NaiveDate};

use crate::winner::Winner;

/// Selects winners by award date.
///
/// Without a month every winner passes. With a month and a day only that
/// exact date passes; with a month alone the whole month does.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinnerFilter {
    month: Option<(i32, u32)>,
    day: Option<u32>,
}

impl WinnerFilter {
    pub fn month(mut self, year: i32, month: Month) -> Self {
        self.month = Some((year, month.number_from_month()));
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn day_opt(mut self, day: Option<u32>) -> Self {
        self.day = day;
        self
    }

    fn target_date(&self) -> Option<NaiveDate> {
        let (year, month) = self.month?;
        NaiveDate::from_ymd_opt(year, month, self.day?)
    }

    pub fn matches(&self, winner: &Winner) -> bool {
        let (year, month) = match self.month {
            Some(month) => month,
            None => return true,
        };

        match self.day {
            // a day that does not exist in the month matches nothing
            Some(_) => self.target_date() == Some(winner.date()),
            None => winner.date().year() == year && winner.date().month() == month,
        }
    }

    pub fn apply<'a, I>(self, winners: I) -> impl Iterator<Item = &'a Winner>
    where
        I: IntoIterator<Item = &'a Winner>,
    {
        winners.into_iter().filter(move |winner| self.matches(winner))
    }
}

/// Winners of `selected_day`, or of the whole month when no day is selected.
///
/// Keeps the input order.
pub fn filter_winners(
    winners: &[Winner],
    year: i32,
    month: Month,
    selected_day: Option<u32>,
) -> Vec<&Winner> {
    WinnerFilter::default()
        .month(year, month)
        .day_opt(selected_day)
        .apply(winners)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winner(id: &str, y: i32, m: u32, d: u32) -> Winner {
        Winner::new(
            id,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Premio",
            "Ganador",
            "XYZ",
            "/img/premio.webp",
        )
    }

    fn ids<'a>(winners: &[&'a Winner]) -> Vec<&'a str> {
        winners.iter().map(|w| w.id()).collect()
    }

    fn sample() -> Vec<Winner> {
        vec![
            winner("c", 2026, 1, 16),
            winner("a", 2026, 1, 9),
            winner("d", 2026, 2, 6),
            winner("b", 2026, 1, 9),
            winner("e", 2025, 1, 9),
        ]
    }

    #[test]
    fn selected_day_is_exact_match() {
        let winners = vec![winner("w-9", 2026, 1, 9), winner("w-16", 2026, 1, 16)];
        let filtered = filter_winners(&winners, 2026, Month::January, Some(9));
        assert_eq!(ids(&filtered), vec!["w-9"]);
    }

    #[test]
    fn month_match_keeps_input_order() {
        let winners = sample();
        let filtered = filter_winners(&winners, 2026, Month::January, None);
        assert_eq!(ids(&filtered), vec!["c", "a", "b"]);
    }

    #[test]
    fn same_day_other_year_is_excluded() {
        let winners = sample();
        let filtered = filter_winners(&winners, 2026, Month::January, Some(9));
        assert_eq!(ids(&filtered), vec!["a", "b"]);
    }

    #[test]
    fn empty_result_is_valid() {
        let winners = sample();
        assert!(filter_winners(&winners, 2026, Month::March, None).is_empty());
        assert!(filter_winners(&winners, 2026, Month::January, Some(23)).is_empty());
        assert!(filter_winners(&[], 2026, Month::January, None).is_empty());
    }

    #[test]
    fn nonexistent_day_matches_nothing() {
        let winners = sample();
        assert!(filter_winners(&winners, 2026, Month::February, Some(31)).is_empty());
    }

    #[test]
    fn day_filter_is_subset_of_month_filter() {
        let winners = sample();
        let month = filter_winners(&winners, 2026, Month::January, None);
        for day in 1..=31 {
            for w in filter_winners(&winners, 2026, Month::January, Some(day)) {
                assert_eq!(w.date().day(), day);
                assert!(month.contains(&w));
            }
        }
    }

    #[test]
    fn builder_matches_single_winner() {
        let filter = WinnerFilter::default().month(2026, Month::February).day(6);
        assert!(filter.matches(&winner("d", 2026, 2, 6)));
        assert!(!filter.matches(&winner("x", 2026, 2, 13)));
        assert!(!filter.matches(&winner("y", 2025, 2, 6)));
    }

    #[test]
    fn unbounded_filter_passes_everything() {
        let winners = sample();
        assert_eq!(WinnerFilter::default().apply(&winners).count(), winners.len());
    }
}

//! Plain text rendering of the winner calendar, in Spanish.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use itertools::Itertools;
use std::fmt;

use crate::calendar::WinnerCalendar;
use crate::winner::Winner;

/// Month name as printed in the calendar header.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "ENERO",
        Month::February => "FEBRERO",
        Month::March => "MARZO",
        Month::April => "ABRIL",
        Month::May => "MAYO",
        Month::June => "JUNIO",
        Month::July => "JULIO",
        Month::August => "AGOSTO",
        Month::September => "SEPTIEMBRE",
        Month::October => "OCTUBRE",
        Month::November => "NOVIEMBRE",
        Month::December => "DICIEMBRE",
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lun",
        Weekday::Tue => "mar",
        Weekday::Wed => "mié",
        Weekday::Thu => "jue",
        Weekday::Fri => "vie",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

/// Long Spanish date, e.g. `vie, 9 de enero de 2026`.
pub fn format_date_for_display(date: NaiveDate) -> String {
    let month = crate::fridays::month_of(date).1;
    format!(
        "{}, {} de {} de {}",
        weekday_abbrev(date.weekday()),
        date.day(),
        month_name(month).to_lowercase(),
        date.year()
    )
}

/// One rendered page of the calendar: header, Friday row and winner cards.
pub struct CalendarPage<'a> {
    calendar: &'a WinnerCalendar,
    winners: &'a [Winner],
}

impl<'a> CalendarPage<'a> {
    pub fn new(calendar: &'a WinnerCalendar, winners: &'a [Winner]) -> Self {
        CalendarPage { calendar, winners }
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let displayed = self.calendar.displayed();
        let prev = if self.calendar.can_go_previous() { "<" } else { " " };
        let next = if self.calendar.can_go_next() { ">" } else { " " };

        writeln!(
            f,
            "{}  {} {}  {}",
            prev,
            month_name(displayed.month),
            displayed.year,
            next
        )
    }

    fn fmt_fridays(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.calendar.fridays().is_empty() {
            return writeln!(f, "(sin sorteos este mes)");
        }

        let row = self
            .calendar
            .fridays()
            .iter()
            .map(|date| {
                if self.calendar.selected_day() == Some(date.day()) {
                    format!("[Vie. {:>2}]", date.day())
                } else {
                    format!(" Vie. {:>2} ", date.day())
                }
            })
            .join(" ");
        writeln!(f, "{}", row)
    }
}

fn fmt_winner(f: &mut fmt::Formatter<'_>, winner: &Winner) -> fmt::Result {
    writeln!(f, "GANADOR  {}", winner.winner_name().to_uppercase())?;
    writeln!(f, "  Cod: {}", winner.code())?;
    writeln!(f, "  {}", winner.prize_name().to_uppercase())?;
    writeln!(f, "  {}", format_date_for_display(winner.date()))?;
    writeln!(f, "  {}", winner.image())
}

impl fmt::Display for CalendarPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        self.fmt_fridays(f)?;
        writeln!(f)?;

        let shown = self.calendar.winners(self.winners);
        if shown.is_empty() {
            writeln!(f, "SIN GANADORES")?;
            return writeln!(
                f,
                "No hay ganadores registrados para esta fecha. Selecciona otro día para ver los resultados."
            );
        }

        for winner in shown {
            fmt_winner(f, winner)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn render(calendar: &WinnerCalendar, winners: &[Winner]) -> String {
    CalendarPage::new(calendar, winners).to_string()
}

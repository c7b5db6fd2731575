use std::fmt;
use std::str::FromStr;

use crate::calendar::NavigableMonth;
use crate::error::{Error, ErrorKind, Result};

/// User interactions with the winner calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    PrevMonth,
    NextMonth,
    Goto(NavigableMonth),
    Select(u32),
    Toggle(u32),
    Clear,
}

pub type CmdResult = Result<Cmd>;

fn parse_day(cmd: &str, arg: Option<&str>) -> Result<u32> {
    arg.and_then(|a| a.trim().parse::<u32>().ok())
        .filter(|day| (1..=31).contains(day))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::CommandParse,
                &format!("'{}' needs a day of month, e.g. '{}:9'", cmd, cmd),
            )
        })
}

impl FromStr for Cmd {
    type Err = Error;

    /// Parses `prev`, `next`, `goto:YYYY-MM`, `select:D`, `toggle:D` and `clear`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(2, ':');
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "noop" => Ok(Cmd::Noop),
            "prev" => Ok(Cmd::PrevMonth),
            "next" => Ok(Cmd::NextMonth),
            "goto" => {
                let month = arg.unwrap_or_default().parse::<NavigableMonth>()?;
                Ok(Cmd::Goto(month))
            }
            "select" => Ok(Cmd::Select(parse_day(name, arg)?)),
            "toggle" => Ok(Cmd::Toggle(parse_day(name, arg)?)),
            "clear" => Ok(Cmd::Clear),
            _ => Err(Error::new(
                ErrorKind::CommandParse,
                &format!("unknown command '{}'", s),
            )),
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cmd::Noop => write!(f, "noop"),
            Cmd::PrevMonth => write!(f, "prev"),
            Cmd::NextMonth => write!(f, "next"),
            Cmd::Goto(month) => write!(f, "goto:{}", month),
            Cmd::Select(day) => write!(f, "select:{}", day),
            Cmd::Toggle(day) => write!(f, "toggle:{}", day),
            Cmd::Clear => write!(f, "clear"),
        }
    }
}

//! Winner records as delivered by the raffle backend.
//!
//! Records are validated once, when they enter the crate. A `Winner` always
//! carries a well-formed award date, so nothing downstream has to deal with
//! unparseable input.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, ErrorKind, Result};

/// Wire shape of a single entry of the backend's winner list.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRecord {
    pub id: String,
    pub date: String,
    pub prize_name: String,
    pub winner_name: String,
    pub code: String,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Winner {
    id: String,
    date: NaiveDate,
    prize_name: String,
    winner_name: String,
    code: String,
    image: String,
}

impl Winner {
    pub fn new(
        id: &str,
        date: NaiveDate,
        prize_name: &str,
        winner_name: &str,
        code: &str,
        image: &str,
    ) -> Self {
        Winner {
            id: id.to_owned(),
            date,
            prize_name: prize_name.to_owned(),
            winner_name: winner_name.to_owned(),
            code: code.to_owned(),
            image: image.to_owned(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn prize_name(&self) -> &str {
        &self.prize_name
    }

    pub fn winner_name(&self) -> &str {
        &self.winner_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

/// Parses an award date.
///
/// Accepts a plain `YYYY-MM-DD`, an RFC 3339 timestamp, or a timestamp without
/// offset. Timestamps keep the calendar date as written.
pub fn parse_award_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    let datetime = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")?;
    Ok(datetime.date())
}

impl TryFrom<WinnerRecord> for Winner {
    type Error = Error;

    fn try_from(record: WinnerRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::MissingField,
                &format!("record for '{}' has no id", record.winner_name),
            ));
        }

        let date = parse_award_date(&record.date)
            .map_err(|e| e.with_msg(&format!("winner '{}' has invalid date '{}'", record.id, record.date)))?;

        Ok(Winner {
            id: record.id,
            date,
            prize_name: record.prize_name,
            winner_name: record.winner_name,
            code: record.code,
            image: record.image,
        })
    }
}

/// Converts backend records into winners, stopping at the first bad one.
pub fn from_records<I>(records: I) -> Result<Vec<Winner>>
where
    I: IntoIterator<Item = WinnerRecord>,
{
    let mut seen = HashSet::new();
    let mut winners = Vec::new();

    for record in records {
        let winner = Winner::try_from(record)?;
        if !seen.insert(winner.id.clone()) {
            return Err(Error::new(
                ErrorKind::DuplicateId,
                &format!("'{}'", winner.id),
            ));
        }
        winners.push(winner);
    }

    Ok(winners)
}

pub fn parse_winners(json: &str) -> Result<Vec<Winner>> {
    let records: Vec<WinnerRecord> = serde_json::from_str(json)?;
    let winners = from_records(records)?;
    log::debug!("Ingested {} winner records", winners.len());
    Ok(winners)
}

/// Reads a JSON winner list from `path`, or from stdin if `path` is `-`.
pub fn load_winners(path: &Path) -> Result<Vec<Winner>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    parse_winners(&content).map_err(|err| {
        log::warn!("Rejected winner list {}: {}", path.display(), err);
        err
    })
}

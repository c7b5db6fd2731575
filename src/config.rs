use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "WINNERCAL_CONFIG_FILE";

fn configfile_locations(
    env_path: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    platform_config_dir: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = env_path.into_iter().collect();

    for dir in xdg_config_home.into_iter().chain(platform_config_dir) {
        let path = dir.join("winnercal").join("config.toml");
        if !locations.contains(&path) {
            locations.push(path);
        }
    }
    if let Some(home) = home {
        locations.push(home.join(".winnercal.toml"));
    }

    locations
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    configfile_locations(
        env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from),
        env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        dirs::config_dir(),
        dirs::home_dir(),
    )
}

#[derive(Clone, Debug, Default, DeserializeFromStr, PartialEq)]
pub enum Timezone {
    #[default]
    Local,
    Iana(chrono_tz::Tz),
}

impl Timezone {
    const LOCAL_ID: &'static str = "local";

    /// Wall clock time in this zone for the instant `utc`.
    pub fn localize(&self, utc: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                local.with_timezone(local.offset())
            }
            Timezone::Iana(tz) => {
                let zoned = utc.with_timezone(tz);
                zoned.with_timezone(&zoned.offset().fix())
            }
        }
    }
}

impl FromStr for Timezone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case(Self::LOCAL_ID) {
            return Ok(Timezone::Local);
        }
        s.parse::<chrono_tz::Tz>().map(Timezone::Iana).map_err(|_| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("'{}' is not an IANA timezone", s),
            )
        })
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Local => write!(f, "{}", Self::LOCAL_ID),
            Timezone::Iana(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// First navigable day of the winner calendar.
    pub min_date: NaiveDate,
    pub timezone: Timezone,
    /// Winner list read when none is given on the command line.
    pub winners: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            timezone: Timezone::default(),
            winners: None,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|e| {
            let msg = format!(
                "{} ({})",
                e.message.as_deref().unwrap_or_default(),
                path.display()
            );
            e.with_msg(&msg)
        })
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.timezone.localize(&Utc::now())
    }
}

/// Loads `path` if given, otherwise the first existing file among the default
/// locations, otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::from_file(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Config::from_file(&path)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn config_locations_in_search_order() {
        let locations = configfile_locations(
            Some(PathBuf::from("/etc/winnercal.toml")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/Library/Application Support")),
            Some(PathBuf::from("/home/ana")),
        );
        assert_eq!(
            locations,
            vec![
                PathBuf::from("/etc/winnercal.toml"),
                PathBuf::from("/xdg/winnercal/config.toml"),
                PathBuf::from("/Library/Application Support/winnercal/config.toml"),
                PathBuf::from("/home/ana/.winnercal.toml"),
            ]
        );
    }

    #[test]
    fn xdg_and_platform_dir_are_not_duplicated() {
        let locations = configfile_locations(
            None,
            Some(PathBuf::from("/home/ana/.config")),
            Some(PathBuf::from("/home/ana/.config")),
            None,
        );
        assert_eq!(
            locations,
            vec![PathBuf::from("/home/ana/.config/winnercal/config.toml")]
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(config.timezone, Timezone::Local);
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_toml(
            r#"
            min_date = "2025-06-01"
            timezone = "America/Lima"
            winners = "/var/lib/winnercal/winners.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(config.timezone, Timezone::Iana(chrono_tz::America::Lima));
        assert_eq!(
            config.winners,
            Some(PathBuf::from("/var/lib/winnercal/winners.json"))
        );
    }

    #[test]
    fn invalid_timezone_is_config_error() {
        let err = Config::from_toml(r#"timezone = "Mars/Olympus""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn invalid_date_is_config_error() {
        let err = Config::from_toml(r#"min_date = "01/01/2026""#).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn localize_to_iana_zone() {
        // 03:00 UTC on Saturday is still Friday evening in Lima (UTC-5)
        let utc = Utc.with_ymd_and_hms(2026, 1, 17, 3, 0, 0).unwrap();
        let lima = Timezone::Iana(chrono_tz::America::Lima).localize(&utc);
        assert_eq!(lima.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
        assert_eq!(lima.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn timezone_display_parses_back() {
        for tz in ["local", "Europe/Madrid"] {
            assert_eq!(tz.parse::<Timezone>().unwrap().to_string(), tz);
        }
    }

    #[test]
    fn explicit_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_date = \"2026-02-01\"").unwrap();

        let config = load_suitable_config(Some(file.path())).unwrap();
        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn explicit_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_suitable_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}

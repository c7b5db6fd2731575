extern crate winnercal as lib;

use chrono::{DateTime, FixedOffset};
use flexi_logger::{FileSpec, Logger};
use lib::calendar::WinnerCalendar;
use lib::cmds::Cmd;
use lib::ctrl::{CalendarController, Control};
use lib::display::CalendarPage;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "winnercal",
    about = "Winner calendar of the weekly Friday raffle."
)]
pub struct Args {
    #[structopt(
        help = "winner list as returned by the backend (JSON), '-' reads stdin",
        parse(from_os_str)
    )]
    pub winners: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        long = "now",
        help = "RFC 3339 timestamp used instead of the system clock",
        parse(try_from_str = DateTime::parse_from_rfc3339)
    )]
    pub now: Option<DateTime<FixedOffset>>,

    #[structopt(
        long = "cmd",
        number_of_values = 1,
        help = "calendar interaction applied in order: prev, next, goto:YYYY-MM, select:D, toggle:D, clear"
    )]
    pub cmds: Vec<Cmd>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        eprintln!(
            "{} {} ran into a fatal error!",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let path = match args.winners.as_ref().or(config.winners.as_ref()) {
        Some(path) => path.clone(),
        None => {
            println!("Nothing to do.");
            return Ok(());
        }
    };
    let winners = lib::winner::load_winners(&path)?;

    let now = args.now.unwrap_or_else(|| config.now());
    log::debug!("Building calendar for {}", now);

    let mut calendar = WinnerCalendar::new(&now, config.min_date);
    CalendarController::default().send_all(&args.cmds, &mut calendar)?;

    print!("{}", CalendarPage::new(&calendar, &winners));

    Ok(())
}

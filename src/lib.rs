pub mod calendar;
pub mod cmds;
pub mod config;
pub mod ctrl;
pub mod display;
pub mod error;
pub mod filter;
pub mod fridays;
pub mod winner;

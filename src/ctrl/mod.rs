pub mod calctrl;
pub mod control;

pub use calctrl::CalendarController;
pub use control::Control;

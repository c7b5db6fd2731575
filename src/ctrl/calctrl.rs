use crate::calendar::WinnerCalendar;
use crate::cmds::{Cmd, CmdResult};
use crate::ctrl::Control;

#[derive(Default)]
pub struct CalendarController {}

impl Control<WinnerCalendar> for CalendarController {
    fn send_cmd(&mut self, cmd: &Cmd, calendar: &mut WinnerCalendar) -> CmdResult {
        let applied = match cmd {
            Cmd::Noop => true,
            Cmd::PrevMonth => calendar.previous_month(),
            Cmd::NextMonth => calendar.next_month(),
            Cmd::Goto(month) => calendar.goto_month(*month),
            Cmd::Select(day) => calendar.select_day(*day),
            Cmd::Toggle(day) => calendar.toggle_day(*day),
            Cmd::Clear => {
                calendar.clear_selection();
                true
            }
        };

        if applied {
            Ok(*cmd)
        } else {
            log::info!("Ignoring '{}' at {}", cmd, calendar.displayed());
            Ok(Cmd::Noop)
        }
    }
}

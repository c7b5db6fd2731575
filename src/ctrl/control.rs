use crate::cmds::{Cmd, CmdResult};
use crate::error::Result;

pub trait Control<C> {
    fn send_cmd(&mut self, cmd: &Cmd, context: &mut C) -> CmdResult;

    /// Applies `cmds` in order, stopping at the first failure.
    fn send_all<'a, I>(&mut self, cmds: I, context: &mut C) -> Result<()>
    where
        I: IntoIterator<Item = &'a Cmd>,
    {
        for cmd in cmds {
            self.send_cmd(cmd, context)?;
        }
        Ok(())
    }
}

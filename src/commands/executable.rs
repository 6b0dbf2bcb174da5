use crate::db::Database;
use crate::error::CommandError;
use crate::frame::Frame;
use crate::server::State;
use crate::session::Session;

/// Everything a command may touch: the server-wide state, already locked, and the session of
/// the client that issued it.
pub struct Context<'a> {
    pub state: &'a mut State,
    pub session: &'a mut Session,
}

impl<'a> Context<'a> {
    pub fn new(state: &'a mut State, session: &'a mut Session) -> Self {
        Self { state, session }
    }

    /// The database selected by this client.
    pub fn db(&mut self) -> &mut Database {
        &mut self.state.dbs[self.session.db]
    }
}

pub trait Executable {
    fn exec(self, ctx: &mut Context<'_>) -> Result<Frame, CommandError>;
}

use super::{CoefficientDisplay, Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Clist;

impl Command for Clist {
    fn name(&self) -> &str {
        "CLIST"
    }
    fn description(&self) -> &str {
        "List current coefficients"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        Ok(CommandOutput::Coefficients(CoefficientDisplay::from_session(
            session,
        )))
    }
}

use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Reset;

impl Command for Reset {
    fn name(&self) -> &str {
        "RESET"
    }
    fn description(&self) -> &str {
        "Zero all coefficients"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        session.model.zero();
        session.last_fit = None;
        Ok(CommandOutput::Text(format!(
            "Reset {} coefficients to zero",
            session.model.parameter_count()
        )))
    }
}

use super::{CoefficientDisplay, Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Fit;

impl Command for Fit {
    fn name(&self) -> &str {
        "FIT"
    }
    fn description(&self) -> &str {
        "Fit free coefficients to the unmasked samples"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        session.fit()?;
        Ok(CommandOutput::Coefficients(CoefficientDisplay::from_session(
            session,
        )))
    }
}

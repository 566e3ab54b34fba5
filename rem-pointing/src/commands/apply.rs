use crate::error::{Error, Result};
use crate::inversion::find_original_coord;
use crate::parser::parse_horizontal_args;
use crate::session::Session;
use super::correct::format_result;
use super::{Command, CommandOutput};

pub struct Apply;

impl Command for Apply {
    fn name(&self) -> &str { "APPLY" }
    fn description(&self) -> &str { "Position to command so the telescope lands on a target" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let target = parse_horizontal_args(args)?;
        target.check_domain()?;
        let (commanded, converged) = find_original_coord(&session.model, target);
        if !converged {
            return Err(Error::Fit(format!(
                "inversion did not converge for target {}",
                target
            )));
        }
        Ok(CommandOutput::Text(format_result(
            "Target",
            target,
            "Command",
            commanded.normalized(),
        )))
    }
}

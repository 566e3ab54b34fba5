use crate::error::Result;
use crate::parser::format_model;
use crate::session::Session;
use super::{single_path, Command, CommandOutput};

pub struct Outmod;

impl Command for Outmod {
    fn name(&self) -> &str { "OUTMOD" }
    fn description(&self) -> &str { "Save model to file" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let path = single_path("OUTMOD", args)?;
        std::fs::write(path, format_model(&session.model))?;
        Ok(CommandOutput::Text(format!("Model saved to {}", path)))
    }
}

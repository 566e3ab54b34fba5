use crate::error::Result;
use crate::parser::parse_model;
use crate::terms::PointingModel;
use crate::session::Session;
use super::{single_path, Command, CommandOutput};

pub struct Inmod;

impl Command for Inmod {
    fn name(&self) -> &str { "INMOD" }
    fn description(&self) -> &str { "Load model from file" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let path = single_path("INMOD", args)?;
        let content = std::fs::read_to_string(path)?;
        let model = parse_model(&content)?;
        let flavor = model.flavor();
        session.set_model(model);
        Ok(CommandOutput::Text(format!(
            "Loaded {} model from {}",
            flavor, path
        )))
    }
}

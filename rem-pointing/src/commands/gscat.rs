use crate::error::Result;
use crate::plot::residuals::{compute_residuals, require_samples};
use crate::plot::terminal::scatter_terminal;
use crate::session::Session;

use super::{Command, CommandOutput};

pub struct Gscat;

impl Command for Gscat {
    fn name(&self) -> &str {
        "GSCAT"
    }

    fn description(&self) -> &str {
        "Scatter plot of residuals (dX vs dAlt)"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        require_samples(session)?;
        let residuals = compute_residuals(session);
        if residuals.is_empty() {
            return Ok(CommandOutput::Text("No active samples".to_string()));
        }
        let points: Vec<(f64, f64)> = residuals.iter().map(|r| (r.dx, r.dalt)).collect();
        Ok(CommandOutput::Text(scatter_terminal(
            &points,
            "Residual Scatter (dX vs dAlt)",
            "dX (arcsec)",
            "dAlt (arcsec)",
        )))
    }
}

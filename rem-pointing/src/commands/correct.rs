use crate::coords::{wrap_pm_180, Horizontal, ARCSEC_PER_DEG};
use crate::error::Result;
use crate::parser::parse_horizontal_args;
use crate::session::Session;
use crate::terms::PointingModel;
use super::{Command, CommandOutput};

pub struct Correct;

impl Command for Correct {
    fn name(&self) -> &str { "CORRECT" }
    fn description(&self) -> &str { "Where the telescope points when commanded to a position" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let commanded = parse_horizontal_args(args)?;
        commanded.check_domain()?;
        let actual = session.model.apply(commanded).normalized();
        Ok(CommandOutput::Text(format_result("Commanded", commanded, "Actual", actual)))
    }
}

pub(crate) fn format_result(from_label: &str, from: Horizontal, to_label: &str, to: Horizontal) -> String {
    format!(
        "{:<10}{}\n{:<10}{}\n  \u{0394}Az:  {:+.2}\"\n  \u{0394}Alt: {:+.2}\"",
        format!("{}:", from_label),
        from,
        format!("{}:", to_label),
        to,
        wrap_pm_180(to.az - from.az) * ARCSEC_PER_DEG,
        (to.alt - from.alt) * ARCSEC_PER_DEG,
    )
}

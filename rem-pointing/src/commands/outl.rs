use crate::error::{Error, Result};
use crate::plot::residuals::compute_residuals;
use crate::session::Session;
use super::{Command, CommandOutput};

pub struct Outl;

impl Command for Outl {
    fn name(&self) -> &str { "OUTL" }
    fn description(&self) -> &str { "Identify outlier samples" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(Error::Parse("OUTL requires a sigma threshold".into()));
        }
        let threshold: f64 = args[0].parse()
            .map_err(|e| Error::Parse(format!("invalid threshold: {}", e)))?;
        let do_mask = args.get(1)
            .is_some_and(|a| a.eq_ignore_ascii_case("M"));

        let fit = session.last_fit.as_ref()
            .ok_or_else(|| Error::Fit("no fit results available (run FIT first)".into()))?;
        let rms = fit.rms_arcsec;
        let cutoff = threshold * rms;

        let outliers: Vec<(usize, f64)> = compute_residuals(session)
            .into_iter()
            .filter(|r| r.dr > cutoff)
            .map(|r| (r.index, r.dr))
            .collect();

        if outliers.is_empty() {
            return Ok(CommandOutput::Text(format!(
                "No outliers (threshold {:.1} * {:.2}\" = {:.2}\")",
                threshold, rms, cutoff
            )));
        }

        let mut output = format!(
            "Outliers (residual > {:.1} * {:.2}\" = {:.2}\"):\n",
            threshold, rms, cutoff
        );
        for &(idx, dr) in &outliers {
            output += &format!("  sample {:>4}: {:.2}\"\n", idx + 1, dr);
        }

        if do_mask {
            for &(idx, _) in &outliers {
                session.samples[idx].masked = true;
            }
            output += &format!("\nMasked {} samples", outliers.len());
        } else {
            output += &format!("\nUse OUTL {:.1} M to mask", threshold);
        }

        Ok(CommandOutput::Text(output))
    }
}

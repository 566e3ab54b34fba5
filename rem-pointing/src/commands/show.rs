use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Show;

impl Command for Show {
    fn name(&self) -> &str {
        "SHOW"
    }
    fn description(&self) -> &str {
        "Display session state"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        let site = format!(
            "lat {} lon {} ({:.0} m)",
            format_dms(session.site.latitude),
            format_dms(session.site.longitude),
            session.site.elevation
        );

        let masked = session.masked_sample_count();
        let total = session.sample_count();
        let samples_str = match (&session.sample_file, masked) {
            (Some(file), 0) => format!("{} from {}", total, file),
            (Some(file), m) => format!("{} from {} ({} masked)", total, file, m),
            (None, 0) => format!("{}", total),
            (None, m) => format!("{} ({} masked)", total, m),
        };

        let fixed = session.model.parameter_count() - session.model.free_count();
        let rms_str = session
            .last_fit
            .as_ref()
            .map(|f| {
                let state = if f.converged { "converged" } else { "not converged" };
                format!("{:.2}\" ({}, {} iterations)", f.rms_arcsec, state, f.iterations)
            })
            .unwrap_or_else(|| "no fit yet".to_string());

        let output = format!(
            "Site: {}\nSamples: {}\nModel: {} ({} coefficients, {} fixed)\nLast fit RMS: {}",
            site,
            samples_str,
            session.flavor(),
            session.model.parameter_count(),
            fixed,
            rms_str,
        );

        Ok(CommandOutput::Text(output))
    }
}

fn format_dms(deg: f64) -> String {
    let sign = if deg < 0.0 { "-" } else { "+" };
    let total = deg.abs();
    let d = total as i32;
    let rem = (total - d as f64) * 60.0;
    let m = rem as i32;
    let s = (rem - m as f64) * 60.0;
    format!("{}{} {:02} {:02}", sign, d, m, s as i32)
}

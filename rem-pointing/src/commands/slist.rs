use super::{Command, CommandOutput};
use crate::error::Result;
use crate::plot::residuals::{sample_residual, SampleResidual};
use crate::session::Session;

pub struct Slist;

impl Command for Slist {
    fn name(&self) -> &str {
        "SLIST"
    }
    fn description(&self) -> &str {
        "List samples with residuals"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        if session.samples.is_empty() {
            return Ok(CommandOutput::Text("No samples loaded".to_string()));
        }
        let header = format!(
            "{:>5} {:>9} {:>8} {:>9} {:>8} {:>8} {:>8} {:>8}",
            "", "cmd Az", "cmd Alt", "obs Az", "obs Alt", "dX", "dAlt", "dR"
        );
        let mut output = header + "\n\n";
        for (i, sample) in session.samples.iter().enumerate() {
            let r = sample_residual(i, sample, &session.model);
            output += &format_row(&r, sample.observed.az, sample.observed.alt);
            output += "\n";
        }
        Ok(CommandOutput::Text(output))
    }
}

fn format_row(r: &SampleResidual, obs_az: f64, obs_alt: f64) -> String {
    let mask_char = if r.masked { "*" } else { " " };
    format!(
        "{:>4}{} {:>9.4} {:>8.4} {:>9.4} {:>8.4} {:>8.2} {:>8.2} {:>8.2}",
        r.index + 1,
        mask_char,
        r.commanded.az,
        r.commanded.alt,
        obs_az,
        obs_alt,
        r.dx,
        r.dalt,
        r.dr
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Horizontal;
    use crate::observation::CalibrationSample;

    #[test]
    fn lists_every_sample_with_mask_marker() {
        let mut session = Session::new();
        let p = Horizontal::new(100.0, 40.0);
        session.samples.push(CalibrationSample::new(p, p));
        let mut masked = CalibrationSample::new(p, Horizontal::new(100.0, 40.001));
        masked.masked = true;
        session.samples.push(masked);
        match Slist.execute(&mut session, &[]).unwrap() {
            CommandOutput::Text(s) => {
                let rows: Vec<&str> = s.lines().skip(2).collect();
                assert_eq!(rows.len(), 2);
                assert!(rows[0].starts_with("   1 "));
                assert!(rows[1].starts_with("   2*"));
                assert!(rows[1].trim_end().ends_with("3.60"));
            }
            _ => panic!("expected Text output"),
        }
    }

    #[test]
    fn empty_session_says_so() {
        let mut session = Session::new();
        match Slist.execute(&mut session, &[]).unwrap() {
            CommandOutput::Text(s) => assert!(s.contains("No samples")),
            _ => panic!("expected Text output"),
        }
    }
}

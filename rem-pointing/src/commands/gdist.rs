use crate::error::Result;
use crate::plot::residuals::{compute_residuals, require_samples};
use crate::plot::terminal::histogram_terminal;
use crate::session::Session;
use super::{Command, CommandOutput};

pub struct Gdist;

impl Command for Gdist {
    fn name(&self) -> &str { "GDIST" }
    fn description(&self) -> &str { "Histogram of residual magnitudes" }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        require_samples(session)?;
        let dr: Vec<f64> = compute_residuals(session).iter().map(|r| r.dr).collect();
        if dr.is_empty() {
            return Ok(CommandOutput::Text("No active samples".to_string()));
        }
        Ok(CommandOutput::Text(histogram_terminal(
            &dr,
            "Residual Distribution",
            "dR",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Horizontal;
    use crate::observation::CalibrationSample;

    #[test]
    fn no_samples_returns_error() {
        let mut session = Session::new();
        let err = Gdist.execute(&mut session, &[]).err().expect("expected error");
        assert!(err.to_string().contains("no samples"));
    }

    #[test]
    fn histogram_reports_mean() {
        let mut session = Session::new();
        for az in [0.0, 90.0, 180.0] {
            session.samples.push(CalibrationSample::new(
                Horizontal::new(az, 45.0),
                Horizontal::new(az, 45.0 + 2.0 / 3600.0),
            ));
        }
        match Gdist.execute(&mut session, &[]).unwrap() {
            CommandOutput::Text(s) => {
                assert!(s.contains("Residual Distribution"));
                assert!(s.contains("mean: 2.00\""), "{}", s);
            }
            _ => panic!("expected Text output"),
        }
    }
}

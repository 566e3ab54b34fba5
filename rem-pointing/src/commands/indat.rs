use crate::coords::ARCSEC_PER_DEG;
use crate::distance::angular_distance;
use crate::error::Result;
use crate::observation::CalibrationSample;
use crate::parser::parse_samples;
use crate::session::Session;
use super::{single_path, Command, CommandOutput};

pub struct Indat;

impl Command for Indat {
    fn name(&self) -> &str { "INDAT" }
    fn description(&self) -> &str { "Load calibration samples from file" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let path = single_path("INDAT", args)?;
        let content = std::fs::read_to_string(path)?;
        let samples = parse_samples(&content)?;
        let summary = format_summary(&samples);
        session.load_samples(samples, Some(path.to_string()));
        Ok(CommandOutput::Text(summary))
    }
}

fn format_summary(samples: &[CalibrationSample]) -> String {
    if samples.is_empty() {
        return "0 samples loaded".to_string();
    }
    let (min_alt, max_alt) = samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
        (lo.min(s.commanded.alt), hi.max(s.commanded.alt))
    });
    let raw_rms = libm::sqrt(
        samples
            .iter()
            .map(|s| {
                let r = angular_distance(s.commanded, s.observed) * ARCSEC_PER_DEG;
                r * r
            })
            .sum::<f64>()
            / samples.len() as f64,
    );
    format!(
        "{} samples loaded\n  Altitude: {:.1} to {:.1} deg\n  Raw RMS:  {:.2}\"",
        samples.len(),
        min_alt,
        max_alt,
        raw_rms,
    )
}

use std::fmt::Write as _;

use crate::coords::Horizontal;
use crate::error::{Error, Result};
use crate::flavor::ModelFlavor;
use crate::model::Coefficients;
use crate::observation::CalibrationSample;
use crate::terms::PointingModel;

pub fn parse_samples(content: &str) -> Result<Vec<CalibrationSample>> {
    let mut samples = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        samples.push(parse_sample_line(trimmed, lineno + 1)?);
    }
    Ok(samples)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('!')
}

fn parse_sample_line(line: &str, lineno: usize) -> Result<CalibrationSample> {
    let p: Vec<&str> = line.split_whitespace().collect();
    if p.len() != 4 {
        return Err(Error::Parse(format!(
            "line {}: sample needs 4 fields (cmd_az cmd_alt obs_az obs_alt), got {}",
            lineno,
            p.len()
        )));
    }
    let field = |i: usize, name: &str| {
        parse_f64(p[i], name).map_err(|e| Error::Parse(format!("line {}: {}", lineno, e)))
    };
    let commanded = Horizontal::new(field(0, "cmd_az")?, field(1, "cmd_alt")?);
    let observed = Horizontal::new(field(2, "obs_az")?, field(3, "obs_alt")?);
    Ok(CalibrationSample::new(commanded, observed))
}

pub fn format_samples(samples: &[CalibrationSample]) -> String {
    let mut out = String::from("# cmd_az cmd_alt obs_az obs_alt\n");
    for s in samples {
        let _ = writeln!(
            out,
            "{:.6} {:.6} {:.6} {:.6}",
            s.commanded.az, s.commanded.alt, s.observed.az, s.observed.alt
        );
    }
    out
}

/// Reads a model file: comments, a `FLAVOR` line, `NAME value` lines and `END`.
///
/// Parameters not listed keep their zero value. Anything after `END` is ignored.
pub fn parse_model(content: &str) -> Result<Coefficients> {
    let mut model: Option<Coefficients> = None;

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let keyword = parts[0].to_uppercase();

        if keyword == "END" {
            break;
        }
        if keyword == "FLAVOR" {
            if model.is_some() {
                return Err(Error::Parse(format!("line {}: duplicate FLAVOR", lineno + 1)));
            }
            let name = parts
                .get(1)
                .ok_or_else(|| Error::Parse(format!("line {}: FLAVOR needs a name", lineno + 1)))?;
            model = Some(Coefficients::new(name.parse::<ModelFlavor>()?));
            continue;
        }

        let m = model.as_mut().ok_or_else(|| {
            Error::Parse(format!(
                "line {}: coefficient before FLAVOR line",
                lineno + 1
            ))
        })?;
        if parts.len() != 2 {
            return Err(Error::Parse(format!(
                "line {}: expected NAME VALUE, got '{}'",
                lineno + 1,
                trimmed
            )));
        }
        let value = parse_f64(parts[1], parts[0])
            .map_err(|e| Error::Parse(format!("line {}: {}", lineno + 1, e)))?;
        m.set(parts[0], value)?;
    }

    model.ok_or_else(|| Error::Parse("no FLAVOR line found".into()))
}

pub fn format_model(model: &Coefficients) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FLAVOR {}", model.flavor());
    for (name, value) in model.parameter_names().iter().zip(model.values()) {
        let _ = writeln!(out, "{:<6} {:.6}", name, value);
    }
    out.push_str("END\n");
    out
}

/// `az alt` in decimal degrees, as typed at the prompt.
pub fn parse_horizontal_args(args: &[&str]) -> Result<Horizontal> {
    match args {
        [az, alt] => Ok(Horizontal::new(
            parse_f64(az, "azimuth")?,
            parse_f64(alt, "altitude")?,
        )),
        _ => Err(Error::Parse(
            "expected 2 args (azimuth altitude in degrees)".into(),
        )),
    }
}

pub fn parse_f64(s: &str, field: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|e| Error::Parse(format!("{}: {}", field, e)))
}

use crate::error::{Error, Result};
use crate::session::Session;
use super::{Command, CommandOutput};

pub struct Mask;
pub struct Unmask;

impl Command for Mask {
    fn name(&self) -> &str { "MASK" }
    fn description(&self) -> &str { "Mask samples (exclude from fit)" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(Error::Parse("MASK requires sample numbers or ALL".into()));
        }
        let indices = parse_sample_indices(args, session.samples.len())?;
        let count = set_masked(session, &indices, true);
        Ok(CommandOutput::Text(format!("Masked {} samples", count)))
    }
}

impl Command for Unmask {
    fn name(&self) -> &str { "UNMASK" }
    fn description(&self) -> &str { "Unmask samples (include in fit)" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(Error::Parse("UNMASK requires sample numbers or ALL".into()));
        }
        let indices = parse_sample_indices(args, session.samples.len())?;
        let count = set_masked(session, &indices, false);
        Ok(CommandOutput::Text(format!("Unmasked {} samples", count)))
    }
}

fn set_masked(session: &mut Session, indices: &[usize], masked: bool) -> usize {
    let mut count = 0;
    for &idx in indices {
        if session.samples[idx].masked != masked {
            session.samples[idx].masked = masked;
            count += 1;
        }
    }
    count
}

/// `n`, `n-m` or `ALL`, 1-based on input, 0-based on output.
fn parse_sample_indices(args: &[&str], total: usize) -> Result<Vec<usize>> {
    if args.len() == 1 && args[0].eq_ignore_ascii_case("ALL") {
        return Ok((0..total).collect());
    }
    let mut indices = Vec::new();
    for arg in args {
        if let Some((lo, hi)) = arg.split_once('-') {
            let start: usize = lo.parse()
                .map_err(|e| Error::Parse(format!("invalid range start: {}", e)))?;
            let end: usize = hi.parse()
                .map_err(|e| Error::Parse(format!("invalid range end: {}", e)))?;
            if start < 1 || end < start || end > total {
                return Err(Error::Parse(format!(
                    "range {}-{} out of bounds (1-{})", start, end, total
                )));
            }
            indices.extend(start - 1..end);
        } else {
            let num: usize = arg.parse()
                .map_err(|e| Error::Parse(format!("invalid sample number: {}", e)))?;
            if num < 1 || num > total {
                return Err(Error::Parse(format!(
                    "sample {} out of bounds (1-{})", num, total
                )));
            }
            indices.push(num - 1);
        }
    }
    Ok(indices)
}

use crate::coords::{wrap_pm_180, Horizontal, ARCSEC_PER_DEG, DEG_TO_RAD};
use crate::distance::angular_distance;
use crate::error::{Error, Result};
use crate::observation::CalibrationSample;
use crate::session::Session;
use crate::terms::PointingModel;

/// Residual of one sample after the current model, in arcseconds.
pub struct SampleResidual {
    /// Position in the session's sample list, 0-based.
    pub index: usize,
    pub commanded: Horizontal,
    /// Azimuth residual scaled by cos(alt), i.e. on the sky.
    pub dx: f64,
    pub dalt: f64,
    /// Great-circle residual.
    pub dr: f64,
    pub masked: bool,
}

pub fn sample_residual<M: PointingModel + ?Sized>(
    index: usize,
    sample: &CalibrationSample,
    model: &M,
) -> SampleResidual {
    let predicted = model.apply(sample.commanded);
    let daz = wrap_pm_180(sample.observed.az - predicted.az);
    let dalt = sample.observed.alt - predicted.alt;
    let cos_alt = libm::cos(sample.observed.alt * DEG_TO_RAD);
    SampleResidual {
        index,
        commanded: sample.commanded,
        dx: daz * cos_alt * ARCSEC_PER_DEG,
        dalt: dalt * ARCSEC_PER_DEG,
        dr: angular_distance(sample.observed, predicted) * ARCSEC_PER_DEG,
        masked: sample.masked,
    }
}

/// Residuals of the unmasked samples.
pub fn compute_residuals(session: &Session) -> Vec<SampleResidual> {
    session
        .samples
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.masked)
        .map(|(i, s)| sample_residual(i, s, &session.model))
        .collect()
}

pub fn require_samples(session: &Session) -> Result<()> {
    if session.samples.is_empty() {
        return Err(Error::Fit("no samples loaded - run INDAT first".into()));
    }
    Ok(())
}

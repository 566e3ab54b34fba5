//! The scalar loss a minimizer drives down when fitting coefficients:
//! angular distance between where each calibration star was observed and
//! where the model says the commanded position actually points.

use crate::coords::ARCSEC_PER_DEG;
use crate::distance::angular_distance;
use crate::error::Result;
use crate::flavor::ModelFlavor;
use crate::model::ModelTerms;
use crate::observation::CalibrationSample;
use crate::terms::PointingModel;

/// Residual of one sample in degrees.
pub fn residual<M: PointingModel + ?Sized>(model: &M, sample: &CalibrationSample) -> f64 {
    angular_distance(sample.observed, model.apply(sample.commanded))
}

/// Sum of residuals over the samples, in degrees.
pub fn objective<M: PointingModel + ?Sized>(model: &M, samples: &[&CalibrationSample]) -> f64 {
    samples.iter().map(|s| residual(model, s)).sum()
}

/// [`objective`] over a flat coefficient vector in the flavour's canonical order.
pub fn objective_from_slice(
    flavor: ModelFlavor,
    params: &[f64],
    samples: &[&CalibrationSample],
) -> Result<f64> {
    let terms = ModelTerms::from_slice(flavor, params)?;
    Ok(objective(&terms, samples))
}

/// Root-mean-square residual in arcseconds.
pub fn rms_arcsec<M: PointingModel + ?Sized>(model: &M, samples: &[&CalibrationSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples
        .iter()
        .map(|s| {
            let r = residual(model, s) * ARCSEC_PER_DEG;
            r * r
        })
        .sum();
    libm::sqrt(sum_sq / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Horizontal;
    use crate::error::Error;
    use crate::terms::{Classic, Extra, Full, Simple};

    fn sample(caz: f64, calt: f64, oaz: f64, oalt: f64) -> CalibrationSample {
        CalibrationSample::new(Horizontal::new(caz, calt), Horizontal::new(oaz, oalt))
    }

    #[test]
    fn zero_model_on_perfect_pointing_is_zero() {
        let s = sample(120.0, 40.0, 120.0, 40.0);
        let refs = [&s];
        assert_eq!(objective(&Simple::default(), &refs), 0.0);
        assert_eq!(objective(&Classic::default(), &refs), 0.0);
        assert_eq!(objective(&Full::default(), &refs), 0.0);
        assert_eq!(objective(&Extra::default(), &refs), 0.0);
    }

    #[test]
    fn exact_model_has_zero_residual() {
        let model = Simple {
            aoff: 0.0,
            zoff: -0.01,
        };
        let s = sample(0.0, 30.0, 0.0, 30.01);
        assert!(residual(&model, &s) < 1e-9);
    }

    #[test]
    fn residual_is_altitude_error_on_meridian() {
        let s = sample(0.0, 30.0, 0.0, 30.5);
        assert!((residual(&Simple::default(), &s) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn objective_sums_samples() {
        let a = sample(0.0, 30.0, 0.0, 30.5);
        let b = sample(0.0, 40.0, 0.0, 40.25);
        let total = objective(&Simple::default(), &[&a, &b]);
        assert!((total - 0.75).abs() < 1e-10);
    }

    #[test]
    fn objective_from_slice_checks_arity() {
        let s = sample(0.0, 30.0, 0.0, 30.0);
        let err = objective_from_slice(ModelFlavor::Classic, &[0.0; 2], &[&s]).unwrap_err();
        assert!(matches!(err, Error::Arity { .. }));
        let ok = objective_from_slice(ModelFlavor::Classic, &[0.0; 7], &[&s]).unwrap();
        assert_eq!(ok, 0.0);
    }

    #[test]
    fn rms_in_arcsec() {
        let a = sample(0.0, 30.0, 0.0, 30.0 + 3.0 / 3600.0);
        let b = sample(0.0, 40.0, 0.0, 40.0 - 4.0 / 3600.0);
        let rms = rms_arcsec(&Simple::default(), &[&a, &b]);
        let expected = ((9.0 + 16.0) / 2.0f64).sqrt();
        assert!((rms - expected).abs() < 1e-6);
    }

    #[test]
    fn rms_of_nothing_is_zero() {
        assert_eq!(rms_arcsec(&Simple::default(), &[]), 0.0);
    }
}

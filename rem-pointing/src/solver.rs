use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Coefficients, ModelTerms};
use crate::minimizer::Minimizer;
use crate::objective::{objective, rms_arcsec};
use crate::observation::CalibrationSample;
use crate::terms::PointingModel;

#[derive(Debug, Clone)]
pub struct FitResult {
    pub coefficients: Coefficients,
    /// Summed angular residual in degrees.
    pub objective: f64,
    /// Objective before the fit, for comparison.
    pub initial_objective: f64,
    pub rms_arcsec: f64,
    pub sample_count: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl FitResult {
    pub fn parameter_names(&self) -> &'static [&'static str] {
        self.coefficients.parameter_names()
    }
}

/// Minimises the summed angular residual over the free coefficients of
/// `start`. Fixed coefficients keep the values they have in `start`.
pub fn fit_model(
    start: &Coefficients,
    samples: &[&CalibrationSample],
    minimizer: &dyn Minimizer,
) -> Result<FitResult> {
    if samples.is_empty() {
        return Err(Error::Fit("no calibration samples to fit".into()));
    }
    let free_count = start.free_count();
    if free_count == 0 {
        return Err(Error::Fit("all coefficients are fixed".into()));
    }
    if samples.len() < free_count {
        return Err(Error::Fit(format!(
            "insufficient samples: {} for {} free coefficients",
            samples.len(),
            free_count
        )));
    }
    for s in samples {
        s.commanded.check_domain()?;
    }

    let flavor = start.flavor();
    let base = start.values();
    let free_indices: Vec<usize> = start
        .fixed_flags()
        .iter()
        .enumerate()
        .filter(|(_, &f)| !f)
        .map(|(i, _)| i)
        .collect();

    let expand = |free: &[f64]| -> Vec<f64> {
        let mut all = base.clone();
        for (fi, &idx) in free_indices.iter().enumerate() {
            all[idx] = free[fi];
        }
        all
    };

    let f = |free: &[f64]| -> f64 {
        match ModelTerms::from_slice(flavor, &expand(free)) {
            Ok(terms) => objective(&terms, samples),
            Err(_) => f64::INFINITY,
        }
    };

    let initial: Vec<f64> = free_indices.iter().map(|&i| base[i]).collect();
    let initial_objective = f(&initial);
    debug!(
        "fitting {} model: {} free of {} coefficients, {} samples, start objective {:.6e}",
        flavor,
        free_count,
        base.len(),
        samples.len(),
        initial_objective
    );

    let min = minimizer.minimize(&f, &initial);

    let mut coefficients = start.clone();
    coefficients.set_values(&expand(&min.point))?;
    let rms = rms_arcsec(&coefficients, samples);

    if min.converged {
        info!(
            "{} fit converged after {} iterations, rms {:.3}\"",
            flavor, min.iterations, rms
        );
    } else {
        warn!(
            "{} fit stopped after {} iterations without converging, rms {:.3}\"",
            flavor, min.iterations, rms
        );
    }

    Ok(FitResult {
        coefficients,
        objective: min.value,
        initial_objective,
        rms_arcsec: rms,
        sample_count: samples.len(),
        iterations: min.iterations,
        converged: min.converged,
    })
}

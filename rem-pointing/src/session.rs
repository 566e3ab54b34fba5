use crate::coords::ARCSEC_PER_DEG;
use crate::error::{Error, Result};
use crate::flavor::ModelFlavor;
use crate::minimizer::NelderMead;
use crate::model::Coefficients;
use crate::objective::residual;
use crate::observation::CalibrationSample;
use crate::site::SiteConfig;
use crate::solver::{self, FitResult};
use crate::terms::PointingModel;

pub struct Session {
    pub samples: Vec<CalibrationSample>,
    pub model: Coefficients,
    pub site: SiteConfig,
    pub minimizer: NelderMead,
    pub last_fit: Option<FitResult>,
    pub sample_file: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            model: Coefficients::default(),
            site: SiteConfig::rem(),
            minimizer: NelderMead::default(),
            last_fit: None,
            sample_file: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_samples(&mut self, samples: Vec<CalibrationSample>, source: Option<String>) {
        self.samples = samples;
        self.sample_file = source;
        self.last_fit = None;
    }

    /// Switches flavour; coefficients and fixed flags start again from zero.
    pub fn set_flavor(&mut self, flavor: ModelFlavor) {
        self.model = Coefficients::new(flavor);
        self.last_fit = None;
    }

    pub fn set_model(&mut self, model: Coefficients) {
        self.model = model;
        self.last_fit = None;
    }

    pub fn fit(&mut self) -> Result<&FitResult> {
        let active = self.active_samples();
        let result = solver::fit_model(&self.model, &active, &self.minimizer)?;
        self.model = result.coefficients.clone();
        Ok(&*self.last_fit.insert(result))
    }

    pub fn active_samples(&self) -> Vec<&CalibrationSample> {
        self.samples.iter().filter(|s| !s.masked).collect()
    }

    pub fn active_sample_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.masked).count()
    }

    pub fn masked_sample_count(&self) -> usize {
        self.samples.iter().filter(|s| s.masked).count()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Residual of every sample under the current model, in arcseconds.
    pub fn residuals_arcsec(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| residual(&self.model, s) * ARCSEC_PER_DEG)
            .collect()
    }

    pub fn flavor(&self) -> ModelFlavor {
        self.model.flavor()
    }

    /// Converts 1-based indices from the prompt into checked 0-based ones.
    pub fn sample_index(&self, one_based: usize) -> Result<usize> {
        if one_based == 0 || one_based > self.samples.len() {
            return Err(Error::Parse(format!(
                "sample {} out of range (1..={})",
                one_based,
                self.samples.len()
            )));
        }
        Ok(one_based - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Horizontal;

    fn samples_for(model: &Coefficients) -> Vec<CalibrationSample> {
        let mut out = Vec::new();
        for az in [0.0, 60.0, 120.0, 180.0, 240.0, 300.0] {
            for alt in [20.0, 50.0] {
                let c = Horizontal::new(az, alt);
                out.push(CalibrationSample::new(c, model.apply(c)));
            }
        }
        out
    }

    #[test]
    fn new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.sample_count(), 0);
        assert_eq!(session.flavor(), ModelFlavor::Classic);
        assert_eq!(session.site, SiteConfig::rem());
        assert!(session.last_fit.is_none());
        assert!(session.sample_file.is_none());
    }

    #[test]
    fn load_samples_clears_previous_fit() {
        let mut truth = Coefficients::new(ModelFlavor::Simple);
        truth.set_values(&[0.05, 0.02]).unwrap();
        let mut session = Session::new();
        session.set_flavor(ModelFlavor::Simple);
        session.load_samples(samples_for(&truth), None);
        session.fit().unwrap();
        assert!(session.last_fit.is_some());
        session.load_samples(samples_for(&truth), Some("again.dat".into()));
        assert!(session.last_fit.is_none());
        assert_eq!(session.sample_file.as_deref(), Some("again.dat"));
    }

    #[test]
    fn fit_updates_model_and_stores_result() {
        let mut truth = Coefficients::new(ModelFlavor::Simple);
        truth.set_values(&[0.05, 0.02]).unwrap();
        let mut session = Session::new();
        session.set_flavor(ModelFlavor::Simple);
        session.load_samples(samples_for(&truth), None);
        let rms = session.fit().unwrap().rms_arcsec;
        assert!(rms < 0.01);
        assert!((session.model.get("AOFF").unwrap() - 0.05).abs() < 1e-6);
        assert!(session.residuals_arcsec().iter().all(|r| *r < 0.01));
    }

    #[test]
    fn fit_skips_masked_samples() {
        let mut truth = Coefficients::new(ModelFlavor::Simple);
        truth.set_values(&[0.05, 0.02]).unwrap();
        let mut session = Session::new();
        session.set_flavor(ModelFlavor::Simple);
        let mut samples = samples_for(&truth);
        samples[0].observed.alt += 1.0;
        samples[0].masked = true;
        session.load_samples(samples, None);
        assert_eq!(session.active_sample_count(), 11);
        assert_eq!(session.masked_sample_count(), 1);
        let result = session.fit().unwrap();
        assert_eq!(result.sample_count, 11);
        assert!((session.model.get("ZOFF").unwrap() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn fit_no_samples_returns_error() {
        let mut session = Session::new();
        assert!(session.fit().is_err());
        assert!(session.last_fit.is_none());
    }

    #[test]
    fn set_flavor_resets_coefficients() {
        let mut session = Session::new();
        session.model.set("AN", 0.3).unwrap();
        session.model.fix("AN");
        session.set_flavor(ModelFlavor::Full);
        assert_eq!(session.model.values(), vec![0.0; 12]);
        assert_eq!(session.model.free_count(), 12);
    }

    #[test]
    fn sample_index_is_one_based() {
        let mut session = Session::new();
        session.load_samples(samples_for(&Coefficients::new(ModelFlavor::Simple)), None);
        assert_eq!(session.sample_index(1).unwrap(), 0);
        assert_eq!(session.sample_index(12).unwrap(), 11);
        assert!(session.sample_index(0).is_err());
        assert!(session.sample_index(13).is_err());
    }
}

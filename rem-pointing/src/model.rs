use serde::{Deserialize, Serialize};

use crate::coords::Horizontal;
use crate::error::{Error, Result};
use crate::flavor::ModelFlavor;
use crate::terms::{Classic, Extra, Full, Parameters, PointingModel, Simple};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flavor", rename_all = "lowercase")]
pub enum ModelTerms {
    Simple(Simple),
    Classic(Classic),
    Full(Full),
    Extra(Extra),
}

impl ModelTerms {
    pub fn zeroed(flavor: ModelFlavor) -> Self {
        match flavor {
            ModelFlavor::Simple => ModelTerms::Simple(Simple::default()),
            ModelFlavor::Classic => ModelTerms::Classic(Classic::default()),
            ModelFlavor::Full => ModelTerms::Full(Full::default()),
            ModelFlavor::Extra => ModelTerms::Extra(Extra::default()),
        }
    }

    pub fn from_slice(flavor: ModelFlavor, values: &[f64]) -> Result<Self> {
        Ok(match flavor {
            ModelFlavor::Simple => ModelTerms::Simple(Simple::from_slice(values)?),
            ModelFlavor::Classic => ModelTerms::Classic(Classic::from_slice(values)?),
            ModelFlavor::Full => ModelTerms::Full(Full::from_slice(values)?),
            ModelFlavor::Extra => ModelTerms::Extra(Extra::from_slice(values)?),
        })
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            ModelTerms::Simple(m) => m.to_vec(),
            ModelTerms::Classic(m) => m.to_vec(),
            ModelTerms::Full(m) => m.to_vec(),
            ModelTerms::Extra(m) => m.to_vec(),
        }
    }

    fn as_model(&self) -> &dyn PointingModel {
        match self {
            ModelTerms::Simple(m) => m,
            ModelTerms::Classic(m) => m,
            ModelTerms::Full(m) => m,
            ModelTerms::Extra(m) => m,
        }
    }
}

impl PointingModel for ModelTerms {
    fn flavor(&self) -> ModelFlavor {
        self.as_model().flavor()
    }

    fn correction(&self, pos: Horizontal) -> Horizontal {
        self.as_model().correction(pos)
    }
}

/// A pointing model of any flavour together with per-parameter fit flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    terms: ModelTerms,
    fixed: Vec<bool>,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::new(ModelFlavor::default())
    }
}

impl Coefficients {
    pub fn new(flavor: ModelFlavor) -> Self {
        Self::from_terms(ModelTerms::zeroed(flavor))
    }

    pub fn from_terms(terms: ModelTerms) -> Self {
        let n = terms.flavor().arity();
        Self {
            terms,
            fixed: vec![false; n],
        }
    }

    pub fn terms(&self) -> &ModelTerms {
        &self.terms
    }

    pub fn parameter_names(&self) -> &'static [&'static str] {
        self.terms.flavor().parameter_names()
    }

    pub fn parameter_count(&self) -> usize {
        self.fixed.len()
    }

    pub fn values(&self) -> Vec<f64> {
        self.terms.to_vec()
    }

    pub fn set_values(&mut self, values: &[f64]) -> Result<()> {
        self.terms = ModelTerms::from_slice(self.terms.flavor(), values)?;
        Ok(())
    }

    pub fn zero(&mut self) {
        self.terms = ModelTerms::zeroed(self.terms.flavor());
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.parameter_names()
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
    }

    fn require_index(&self, name: &str) -> Result<usize> {
        self.index_of(name).ok_or_else(|| Error::UnknownParameter {
            flavor: self.terms.flavor(),
            name: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        let idx = self.require_index(name)?;
        Ok(self.values()[idx])
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let idx = self.require_index(name)?;
        let mut values = self.values();
        values[idx] = value;
        self.set_values(&values)
    }

    pub fn fix(&mut self, name: &str) -> bool {
        if let Some(idx) = self.index_of(name) {
            self.fixed[idx] = true;
            return true;
        }
        false
    }

    pub fn unfix(&mut self, name: &str) -> bool {
        if let Some(idx) = self.index_of(name) {
            self.fixed[idx] = false;
            return true;
        }
        false
    }

    pub fn fix_all(&mut self) {
        self.fixed.iter_mut().for_each(|f| *f = true);
    }

    pub fn unfix_all(&mut self) {
        self.fixed.iter_mut().for_each(|f| *f = false);
    }

    pub fn is_fixed(&self, idx: usize) -> bool {
        self.fixed.get(idx).copied().unwrap_or(false)
    }

    pub fn fixed_flags(&self) -> &[bool] {
        &self.fixed
    }

    pub fn free_count(&self) -> usize {
        self.fixed.iter().filter(|&&f| !f).count()
    }
}

impl PointingModel for Coefficients {
    fn flavor(&self) -> ModelFlavor {
        self.terms.flavor()
    }

    fn correction(&self, pos: Horizontal) -> Horizontal {
        self.terms.correction(pos)
    }
}

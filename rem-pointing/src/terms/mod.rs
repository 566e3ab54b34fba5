//! The four REM pointing-model flavours.
//!
//! Each flavour is a record of named coefficients. Evaluating it at a
//! commanded position gives the azimuth correction and the negated
//! zenith-distance correction, both in degrees, as a [`Horizontal`] so the
//! result can be added straight onto the commanded position.

pub mod classic;
pub mod extra;
pub mod full;
pub mod simple;

pub use classic::Classic;
pub use extra::Extra;
pub use full::Full;
pub use simple::Simple;

use crate::coords::{Horizontal, DEG_TO_RAD};
use crate::error::{Error, Result};
use crate::flavor::ModelFlavor;

pub trait PointingModel: Send + Sync {
    fn flavor(&self) -> ModelFlavor;

    /// `(naz, -nzd)` at the commanded position.
    fn correction(&self, pos: Horizontal) -> Horizontal;

    /// Where the telescope actually points when commanded to `pos`.
    fn apply(&self, pos: Horizontal) -> Horizontal {
        pos + self.correction(pos)
    }
}

/// Conversion between a named coefficient record and the flat vector a
/// minimizer works on.
pub trait Parameters: Sized {
    const FLAVOR: ModelFlavor;
    const PARAMETER_NAMES: &'static [&'static str];

    fn to_vec(&self) -> Vec<f64>;

    fn from_slice(values: &[f64]) -> Result<Self>;
}

pub(crate) fn check_arity(flavor: ModelFlavor, expected: usize, values: &[f64]) -> Result<()> {
    if values.len() != expected {
        return Err(Error::Arity {
            flavor,
            expected,
            got: values.len(),
        });
    }
    Ok(())
}

/// Azimuth and zenith distance in radians, the common first step of every flavour.
#[inline]
pub(crate) fn radians(pos: Horizontal) -> (f64, f64) {
    (pos.az * DEG_TO_RAD, pos.zenith_distance() * DEG_TO_RAD)
}

use serde::{Deserialize, Serialize};

use super::{check_arity, Parameters, PointingModel};
use crate::coords::Horizontal;
use crate::error::Result;
use crate::flavor::ModelFlavor;

/// Zero-point offsets only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Simple {
    /// Azimuth zero point.
    pub aoff: f64,
    /// Zenith-distance zero point.
    pub zoff: f64,
}

impl PointingModel for Simple {
    fn flavor(&self) -> ModelFlavor {
        ModelFlavor::Simple
    }

    fn correction(&self, _pos: Horizontal) -> Horizontal {
        Horizontal::new(self.aoff, -self.zoff)
    }
}

impl Parameters for Simple {
    const FLAVOR: ModelFlavor = ModelFlavor::Simple;
    const PARAMETER_NAMES: &'static [&'static str] = &["AOFF", "ZOFF"];

    fn to_vec(&self) -> Vec<f64> {
        vec![self.aoff, self.zoff]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity(Self::FLAVOR, Self::PARAMETER_NAMES.len(), values)?;
        Ok(Self {
            aoff: values[0],
            zoff: values[1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offsets_give_zero() {
        let c = Simple::default().correction(Horizontal::new(0.0, 0.0));
        assert_eq!(c, Horizontal::new(0.0, 0.0));
    }

    #[test]
    fn independent_of_position() {
        let model = Simple {
            aoff: 0.1234,
            zoff: -0.0567,
        };
        for &(az, alt) in &[(0.0, 0.0), (123.456, 12.3), (359.9, 89.0), (180.0, 90.0), (-45.0, -30.0)] {
            let c = model.correction(Horizontal::new(az, alt));
            assert_eq!(c.az, 0.1234);
            assert_eq!(c.alt, 0.0567);
        }
    }

    #[test]
    fn from_slice_wrong_length() {
        assert!(Simple::from_slice(&[1.0]).is_err());
        assert!(Simple::from_slice(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn from_slice_order() {
        let s = Simple::from_slice(&[1.0, 2.0]).unwrap();
        assert_eq!(s.aoff, 1.0);
        assert_eq!(s.zoff, 2.0);
        assert_eq!(s.to_vec(), vec![1.0, 2.0]);
    }
}

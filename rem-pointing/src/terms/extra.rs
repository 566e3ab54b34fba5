use serde::{Deserialize, Serialize};

use super::{check_arity, radians, Parameters, PointingModel};
use crate::coords::{cotg, Horizontal};
use crate::error::Result;
use crate::flavor::ModelFlavor;
use crate::terms::Full;

/// [`Full`] plus second-harmonic bearing terms and an empirical `C5` term.
///
/// The azimuth second harmonic multiplies `cos(2 az)` for both `as2a` and
/// `ac2a`, so the two coefficients are degenerate with each other. Fitted
/// coefficient files depend on this form and it is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extra {
    #[serde(flatten)]
    pub full: Full,
    pub as2a: f64,
    pub ac2a: f64,
    pub zs2a: f64,
    pub zc2a: f64,
    pub c5: f64,
}

impl PointingModel for Extra {
    fn flavor(&self) -> ModelFlavor {
        ModelFlavor::Extra
    }

    fn correction(&self, pos: Horizontal) -> Horizontal {
        let (azr, zdr) = radians(pos);
        let base = self.full.correction(pos);
        let (sin_2az, cos_2az) = libm::sincos(2.0 * azr);

        let naz = base.az + (self.as2a * cos_2az + self.ac2a * cos_2az) * cotg(zdr);
        let nzd = -base.alt + self.zs2a * sin_2az + self.zc2a * cos_2az + self.c5 / libm::sin(zdr);
        Horizontal::new(naz, -nzd)
    }
}

impl Parameters for Extra {
    const FLAVOR: ModelFlavor = ModelFlavor::Extra;
    const PARAMETER_NAMES: &'static [&'static str] = &[
        "AAN", "ZAN", "AAE", "ZAE", "NPAE", "BNP", "AES", "AEC", "ZES", "ZEC", "AOFF", "ZOFF",
        "AS2A", "AC2A", "ZS2A", "ZC2A", "C5",
    ];

    fn to_vec(&self) -> Vec<f64> {
        let mut v = self.full.to_vec();
        v.extend_from_slice(&[self.as2a, self.ac2a, self.zs2a, self.zc2a, self.c5]);
        v
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity(Self::FLAVOR, Self::PARAMETER_NAMES.len(), values)?;
        Ok(Self {
            full: Full::from_slice(&values[..12])?,
            as2a: values[12],
            ac2a: values[13],
            zs2a: values[14],
            zc2a: values[15],
            c5: values[16],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_full_when_extra_terms_are_zero() {
        let full = Full {
            aan: 0.01,
            zan: -0.02,
            aae: 0.03,
            zae: 0.004,
            npae: 0.005,
            bnp: -0.006,
            aes: 0.007,
            aec: 0.008,
            zes: -0.009,
            zec: 0.01,
            aoff: 0.2,
            zoff: -0.1,
        };
        let extra = Extra {
            full,
            ..Default::default()
        };
        for &(az, alt) in &[(10.0, 20.0), (135.0, 55.0), (300.0, 75.0)] {
            let pos = Horizontal::new(az, alt);
            let a = full.correction(pos);
            let b = extra.correction(pos);
            assert!((a.az - b.az).abs() < 1e-15);
            assert!((a.alt - b.alt).abs() < 1e-15);
        }
    }

    // Known discrepancy: AS2A multiplies cos(2 az) rather than sin(2 az), so
    // at az = 45 deg (where cos(2 az) = 0) neither azimuth harmonic has any
    // effect, and at az = 0 AS2A and AC2A are interchangeable.
    #[test]
    fn azimuth_harmonic_uses_cosine_for_both_terms() {
        let as2a = Extra {
            as2a: 0.1,
            ..Default::default()
        };
        let ac2a = Extra {
            ac2a: 0.1,
            ..Default::default()
        };
        let at_45 = Horizontal::new(45.0, 45.0);
        assert!(as2a.correction(at_45).az.abs() < 1e-15);
        assert!(ac2a.correction(at_45).az.abs() < 1e-15);

        let at_0 = Horizontal::new(0.0, 45.0);
        let a = as2a.correction(at_0).az;
        let b = ac2a.correction(at_0).az;
        assert!((a - b).abs() < 1e-15);
        assert!((a - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zenith_harmonics_use_sine_and_cosine() {
        let model = Extra {
            zs2a: 0.1,
            zc2a: 0.2,
            ..Default::default()
        };
        // 2 az = 90 deg: sine term only
        let c = model.correction(Horizontal::new(45.0, 30.0));
        assert!((c.alt + 0.1).abs() < 1e-12);
    }

    #[test]
    fn c5_grows_toward_zenith() {
        let model = Extra {
            c5: 0.01,
            ..Default::default()
        };
        let horizon = model.correction(Horizontal::new(0.0, 0.0));
        let high = model.correction(Horizontal::new(0.0, 80.0));
        assert!((horizon.alt + 0.01).abs() < 1e-15);
        assert!(high.alt.abs() > horizon.alt.abs());
    }

    #[test]
    fn vector_round_trip_keeps_order() {
        let values: Vec<f64> = (1..=17).map(|i| i as f64).collect();
        let model = Extra::from_slice(&values).unwrap();
        assert_eq!(model.full.aan, 1.0);
        assert_eq!(model.full.zoff, 12.0);
        assert_eq!(model.as2a, 13.0);
        assert_eq!(model.c5, 17.0);
        assert_eq!(model.to_vec(), values);
    }

    #[test]
    fn from_slice_rejects_full_arity() {
        assert!(Extra::from_slice(&[0.0; 12]).is_err());
    }
}

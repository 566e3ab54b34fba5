use serde::{Deserialize, Serialize};

use super::{check_arity, radians, Parameters, PointingModel};
use crate::coords::{cotg, Horizontal};
use crate::error::Result;
use crate::flavor::ModelFlavor;

/// The classic seven-term alt-azimuth model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Classic {
    /// Azimuth axis tilt toward north.
    pub an: f64,
    /// Azimuth axis tilt toward east.
    pub ae: f64,
    /// Non-perpendicularity of the azimuth and elevation axes.
    pub npae: f64,
    /// Non-perpendicularity of the optical and elevation axes.
    pub bnp: f64,
    /// Tube flexure.
    pub tf: f64,
    pub aoff: f64,
    pub zoff: f64,
}

impl PointingModel for Classic {
    fn flavor(&self) -> ModelFlavor {
        ModelFlavor::Classic
    }

    fn correction(&self, pos: Horizontal) -> Horizontal {
        let (azr, zdr) = radians(pos);
        let (sin_az, cos_az) = libm::sincos(azr);
        let cot_zd = cotg(zdr);
        let sin_zd = libm::sin(zdr);

        let naz = -self.an * sin_az * cot_zd + self.ae * cos_az * cot_zd + self.npae * cot_zd
            - self.bnp / sin_zd
            + self.aoff;
        let nzd = self.an * cos_az + self.ae * sin_az + self.tf * sin_zd + self.zoff;
        Horizontal::new(naz, -nzd)
    }
}

impl Parameters for Classic {
    const FLAVOR: ModelFlavor = ModelFlavor::Classic;
    const PARAMETER_NAMES: &'static [&'static str] =
        &["AN", "AE", "NPAE", "BNP", "TF", "AOFF", "ZOFF"];

    fn to_vec(&self) -> Vec<f64> {
        vec![self.an, self.ae, self.npae, self.bnp, self.tf, self.aoff, self.zoff]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity(Self::FLAVOR, Self::PARAMETER_NAMES.len(), values)?;
        Ok(Self {
            an: values[0],
            ae: values[1],
            npae: values[2],
            bnp: values[3],
            tf: values[4],
            aoff: values[5],
            zoff: values[6],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Classic {
        Classic {
            an: 0.1,
            ae: 0.05,
            npae: 0.02,
            bnp: 0.01,
            tf: 0.03,
            aoff: 0.5,
            zoff: -0.2,
        }
    }

    #[test]
    fn regression_south_at_45() {
        let c = sample().correction(Horizontal::new(180.0, 45.0));
        assert!((c.az - 0.455857864376269).abs() < 1e-12, "naz = {}", c.az);
        assert!((c.alt - 0.2787867965644036).abs() < 1e-12, "nalt = {}", c.alt);
    }

    #[test]
    fn npae_scales_with_cotangent_of_zenith_distance() {
        let model = Classic {
            npae: 1.0,
            ..Default::default()
        };
        // zd = 30 deg, cot = sqrt(3)
        let c = model.correction(Horizontal::new(77.0, 60.0));
        assert!((c.az - 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(c.alt, 0.0);
    }

    #[test]
    fn tube_flexure_is_largest_at_horizon() {
        let model = Classic {
            tf: 0.01,
            ..Default::default()
        };
        let horizon = model.correction(Horizontal::new(0.0, 0.0));
        let high = model.correction(Horizontal::new(0.0, 80.0));
        assert!((horizon.alt + 0.01).abs() < 1e-15);
        assert!(high.alt.abs() < horizon.alt.abs());
    }

    #[test]
    fn zero_points_pass_through() {
        let model = Classic {
            aoff: 0.3,
            zoff: 0.4,
            ..Default::default()
        };
        let c = model.correction(Horizontal::new(250.0, 33.0));
        assert_eq!(c.az, 0.3);
        assert_eq!(c.alt, -0.4);
    }

    #[test]
    fn vector_round_trip_keeps_order() {
        let model = sample();
        assert_eq!(Classic::from_slice(&model.to_vec()).unwrap(), model);
    }

    #[test]
    fn from_slice_rejects_full_arity() {
        assert!(Classic::from_slice(&[0.0; 12]).is_err());
    }
}

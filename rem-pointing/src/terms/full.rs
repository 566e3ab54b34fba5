use serde::{Deserialize, Serialize};

use super::{check_arity, radians, Parameters, PointingModel};
use crate::coords::{cotg, Horizontal};
use crate::error::Result;
use crate::flavor::ModelFlavor;

/// Twelve-term model with separate axis tilts and encoder eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Full {
    /// Levelling error toward north, azimuth and zenith components.
    pub aan: f64,
    pub zan: f64,
    /// Levelling error toward east, azimuth and zenith components.
    pub aae: f64,
    pub zae: f64,
    pub npae: f64,
    pub bnp: f64,
    /// Azimuth encoder eccentricity.
    pub aes: f64,
    pub aec: f64,
    /// Zenith encoder eccentricity.
    pub zes: f64,
    pub zec: f64,
    pub aoff: f64,
    pub zoff: f64,
}

impl PointingModel for Full {
    fn flavor(&self) -> ModelFlavor {
        ModelFlavor::Full
    }

    fn correction(&self, pos: Horizontal) -> Horizontal {
        let (azr, zdr) = radians(pos);
        let (sin_az, cos_az) = libm::sincos(azr);
        let (sin_zd, cos_zd) = libm::sincos(zdr);
        let cot_zd = cotg(zdr);

        let naz = self.aan * sin_az * cot_zd - self.aae * cos_az * cot_zd + self.npae * cot_zd
            - self.bnp / sin_zd
            + self.aoff
            + self.aes * sin_az
            + self.aec * cos_az;
        let nzd = self.zan * cos_az
            + self.zae * sin_az
            + self.zoff
            + self.zes * sin_zd
            + self.zec * cos_zd;
        Horizontal::new(naz, -nzd)
    }
}

impl Parameters for Full {
    const FLAVOR: ModelFlavor = ModelFlavor::Full;
    const PARAMETER_NAMES: &'static [&'static str] = &[
        "AAN", "ZAN", "AAE", "ZAE", "NPAE", "BNP", "AES", "AEC", "ZES", "ZEC", "AOFF", "ZOFF",
    ];

    fn to_vec(&self) -> Vec<f64> {
        vec![
            self.aan, self.zan, self.aae, self.zae, self.npae, self.bnp, self.aes, self.aec,
            self.zes, self.zec, self.aoff, self.zoff,
        ]
    }

    fn from_slice(values: &[f64]) -> Result<Self> {
        check_arity(Self::FLAVOR, Self::PARAMETER_NAMES.len(), values)?;
        Ok(Self {
            aan: values[0],
            zan: values[1],
            aae: values[2],
            zae: values[3],
            npae: values[4],
            bnp: values[5],
            aes: values[6],
            aec: values[7],
            zes: values[8],
            zec: values[9],
            aoff: values[10],
            zoff: values[11],
        })
    }
}

//! Horizontal (azimuth/altitude) positions and the angle helpers the
//! pointing terms are built from.
//!
//! Everything here works in degrees except [`cotg`], which takes radians
//! like the trigonometric functions it sits beside.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;
pub const ARCSEC_PER_DEG: f64 = 3600.0;

/// An azimuth/altitude pair in degrees.
///
/// Azimuth is not normalised; callers that need [0, 360) use
/// [`Horizontal::normalized`]. Altitude is expected in [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Horizontal {
    pub az: f64,
    pub alt: f64,
}

impl Horizontal {
    pub const fn new(az: f64, alt: f64) -> Self {
        Self { az, alt }
    }

    pub fn zenith_distance(&self) -> f64 {
        90.0 - self.alt
    }

    pub fn normalized(&self) -> Self {
        Self::new(wrap_0_360(self.az), self.alt)
    }

    /// Rejects positions where the cotangent and cosecant terms blow up.
    ///
    /// The model functions never call this; it is for callers that want
    /// strict inputs instead of IEEE infinities.
    pub fn check_domain(&self) -> Result<()> {
        let zd = self.zenith_distance();
        if !self.az.is_finite() || !self.alt.is_finite() || zd <= 0.0 || zd >= 180.0 {
            return Err(Error::Singular {
                az: self.az,
                alt: self.alt,
            });
        }
        Ok(())
    }
}

impl std::ops::Add for Horizontal {
    type Output = Horizontal;

    fn add(self, rhs: Horizontal) -> Horizontal {
        Horizontal::new(self.az + rhs.az, self.alt + rhs.alt)
    }
}

impl std::fmt::Display for Horizontal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "az {:9.5}  alt {:+9.5}", self.az, self.alt)
    }
}

#[inline]
pub fn cotg(x: f64) -> f64 {
    1.0 / libm::tan(x)
}

pub fn wrap_0_360(deg: f64) -> f64 {
    let w = libm::fmod(deg, 360.0);
    if w < 0.0 {
        w + 360.0
    } else {
        w
    }
}

/// Wraps an angular difference into [-180, 180).
pub fn wrap_pm_180(deg: f64) -> f64 {
    let w = wrap_0_360(deg + 180.0);
    w - 180.0
}

use serde::{Deserialize, Serialize};

use crate::coords::Horizontal;

/// One calibration star: where the mount was commanded and where the star
/// was actually found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub commanded: Horizontal,
    pub observed: Horizontal,
    #[serde(default)]
    pub masked: bool,
}

impl CalibrationSample {
    pub fn new(commanded: Horizontal, observed: Horizontal) -> Self {
        Self {
            commanded,
            observed,
            masked: false,
        }
    }

    /// Observed minus commanded, azimuth wrapped into [-180, 180).
    pub fn raw_offset(&self) -> Horizontal {
        Horizontal::new(
            crate::coords::wrap_pm_180(self.observed.az - self.commanded.az),
            self.observed.alt - self.commanded.alt,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sample_is_unmasked() {
        let s = CalibrationSample::new(Horizontal::new(1.0, 2.0), Horizontal::new(3.0, 4.0));
        assert!(!s.masked);
    }

    #[test]
    fn raw_offset_wraps_azimuth() {
        let s = CalibrationSample::new(Horizontal::new(359.9, 40.0), Horizontal::new(0.1, 40.5));
        let off = s.raw_offset();
        assert!((off.az - 0.2).abs() < 1e-9);
        assert!((off.alt - 0.5).abs() < 1e-12);
    }

    #[test]
    fn masked_flag_defaults_when_absent() {
        let json = r#"{"commanded":{"az":10.0,"alt":20.0},"observed":{"az":10.5,"alt":20.25}}"#;
        let s: CalibrationSample = serde_json::from_str(json).unwrap();
        assert!(!s.masked);
        assert_eq!(s.observed, Horizontal::new(10.5, 20.25));
    }
}

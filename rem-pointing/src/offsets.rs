//! Pointing offsets of an image frame: where the header says the telescope
//! was pointing versus where the astrometric solution puts the frame.
//!
//! Frame access goes through [`FrameHeader`] and [`WorldCoordinates`] so
//! that callers can plug in whichever FITS reader they use. Any missing
//! piece produces an empty [`OffsetReport`] rather than an error.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::coords::wrap_pm_180;
use crate::site::{HorizontalTransform, SiteConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderKeys {
    pub ra: String,
    pub dec: String,
    pub date_obs: String,
}

impl Default for HeaderKeys {
    fn default() -> Self {
        Self {
            ra: "RA".into(),
            dec: "DEC".into(),
            date_obs: "DATE-OBS".into(),
        }
    }
}

pub trait FrameHeader {
    fn value(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct HeaderMap(pub HashMap<String, String>);

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl FrameHeader for HeaderMap {
    fn value(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Astrometric solution of a frame, RA/Dec in degrees.
pub trait WorldCoordinates {
    fn centre(&self) -> (f64, f64);
    fn pixel_to_world(&self, x: f64, y: f64) -> (f64, f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsetReport {
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub ra_offset: Option<f64>,
    pub dec_offset: Option<f64>,
    pub az: Option<f64>,
    pub alt: Option<f64>,
    pub az_offset: Option<f64>,
    pub alt_offset: Option<f64>,
}

impl OffsetReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds, taken as UTC.
pub fn parse_date_obs(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().trim_matches('\'').trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Header pointing minus the solved position of the frame centre (or of
/// `centre_pixel` when given), in both RA/Dec and Az/Alt, in degrees.
pub fn frame_offsets(
    header: Option<&dyn FrameHeader>,
    wcs: Option<&dyn WorldCoordinates>,
    centre_pixel: Option<(f64, f64)>,
    keys: &HeaderKeys,
    site: &SiteConfig,
    transform: &dyn HorizontalTransform,
) -> OffsetReport {
    let (Some(header), Some(wcs)) = (header, wcs) else {
        debug!("offset report skipped: header or WCS missing");
        return OffsetReport::default();
    };

    let number = |key: &str| {
        header
            .value(key)
            .and_then(|v| v.trim().trim_matches('\'').trim().parse::<f64>().ok())
    };
    let (Some(ra), Some(dec)) = (number(&keys.ra), number(&keys.dec)) else {
        debug!("offset report skipped: {} / {} missing or not numeric", keys.ra, keys.dec);
        return OffsetReport::default();
    };
    let Some(time) = header.value(&keys.date_obs).and_then(|v| parse_date_obs(&v)) else {
        debug!("offset report skipped: {} missing or unparsable", keys.date_obs);
        return OffsetReport::default();
    };

    let (ra_c, dec_c) = match centre_pixel {
        Some((x, y)) => wcs.pixel_to_world(x, y),
        None => wcs.centre(),
    };

    let pointed = transform.to_horizontal(site, ra, dec, time);
    let solved = transform.to_horizontal(site, ra_c, dec_c, time);

    OffsetReport {
        ra: Some(ra),
        dec: Some(dec),
        ra_offset: Some(wrap_pm_180(ra - ra_c)),
        dec_offset: Some(dec - dec_c),
        az: Some(pointed.az),
        alt: Some(pointed.alt),
        az_offset: Some(wrap_pm_180(pointed.az - solved.az)),
        alt_offset: Some(pointed.alt - solved.alt),
    }
}

//! Observatory site and the sky-to-horizontal transform used for offset
//! reports.
//!
//! [`SiderealTransform`] takes J2000 RA/Dec, precesses them to the mean
//! equator and equinox of date (IAU 2006, Fukushima-Williams angles), then
//! rotates by mean sidereal time: Earth rotation angle plus the IAU 2006 GMST
//! polynomial. UT1 and TT are both taken as UTC. Nutation and refraction are
//! left out.

use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::coords::{wrap_0_360, Horizontal, DEG_TO_RAD, RAD_TO_DEG};

const J2000_JD: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;
const SECONDS_PER_DAY: f64 = 86400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
const ARCSEC_TO_RAD: f64 = DEG_TO_RAD / 3600.0;
const TWOPI: f64 = 2.0 * std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Geodetic latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// Metres above sea level.
    pub elevation: f64,
}

impl SiteConfig {
    /// REM at La Silla.
    pub const fn rem() -> Self {
        Self {
            latitude: -29.2567,
            longitude: -70.7292,
            elevation: 2347.0,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::rem()
    }
}

/// Converts an equatorial position (degrees) seen from `site` at `time`
/// into azimuth and altitude.
pub trait HorizontalTransform {
    fn to_horizontal(&self, site: &SiteConfig, ra: f64, dec: f64, time: DateTime<Utc>)
        -> Horizontal;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SiderealTransform;

impl SiderealTransform {
    /// Local mean sidereal time in degrees.
    pub fn local_sidereal_degrees(&self, site: &SiteConfig, time: DateTime<Utc>) -> f64 {
        let (jd1, jd2) = julian_date(time);
        wrap_0_360(gmst(jd1, jd2) * RAD_TO_DEG + site.longitude)
    }
}

impl HorizontalTransform for SiderealTransform {
    fn to_horizontal(
        &self,
        site: &SiteConfig,
        ra: f64,
        dec: f64,
        time: DateTime<Utc>,
    ) -> Horizontal {
        let (jd1, jd2) = julian_date(time);
        let (ra, dec) = precess_from_j2000(ra, dec, jd1, jd2);
        let ha = (self.local_sidereal_degrees(site, time) - ra) * DEG_TO_RAD;
        hour_angle_to_horizontal(ha, dec * DEG_TO_RAD, site.latitude * DEG_TO_RAD)
    }
}

/// Mean J2000 RA/Dec (degrees) to the mean equator and equinox of date.
pub fn precess_from_j2000(ra: f64, dec: f64, jd1: f64, jd2: f64) -> (f64, f64) {
    let t = ((jd1 - J2000_JD) + jd2) / DAYS_PER_JULIAN_CENTURY;
    let (sin_ra, cos_ra) = libm::sincos(ra * DEG_TO_RAD);
    let (sin_dec, cos_dec) = libm::sincos(dec * DEG_TO_RAD);
    let v = precession_matrix(t) * Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec);

    let r = libm::sqrt(v.x * v.x + v.y * v.y);
    let ra_date = if r != 0.0 { libm::atan2(v.y, v.x) } else { 0.0 };
    (
        wrap_0_360(ra_date * RAD_TO_DEG),
        libm::atan2(v.z, r) * RAD_TO_DEG,
    )
}

/// Pure precession from mean J2000 to mean of date, `t` in Julian centuries.
/// The frame bias at J2000 is divided out.
fn precession_matrix(t: f64) -> Matrix3<f64> {
    fukushima_williams(t) * fukushima_williams(0.0).transpose()
}

fn fukushima_williams(t: f64) -> Matrix3<f64> {
    let gamb = (-0.052928
        + (10.556378
            + (0.4932044 + (-0.00031238 + (-0.000002788 + (0.0000000260) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;
    let phib = (84381.412819
        + (-46.811016
            + (0.0511268 + (0.00053289 + (-0.000000440 + (-0.0000000176) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;
    let psib = (-0.041775
        + (5038.481484
            + (1.5584175 + (-0.00018522 + (-0.000026452 + (-0.0000000148) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;
    let epsa = (84381.406
        + (-46.836769
            + (-0.0001831 + (0.00200340 + (-0.000000576 + (-0.0000000434) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;

    rot_x(-epsa) * rot_z(-psib) * rot_x(phib) * rot_z(gamb)
}

fn rot_x(phi: f64) -> Matrix3<f64> {
    let (s, c) = libm::sincos(phi);
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

fn rot_z(psi: f64) -> Matrix3<f64> {
    let (s, c) = libm::sincos(psi);
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

fn hour_angle_to_horizontal(ha: f64, dec: f64, lat: f64) -> Horizontal {
    let (sin_ha, cos_ha) = libm::sincos(ha);
    let (sin_dec, cos_dec) = libm::sincos(dec);
    let (sin_lat, cos_lat) = libm::sincos(lat);

    let x = -cos_ha * cos_dec * sin_lat + sin_dec * cos_lat;
    let y = -sin_ha * cos_dec;
    let z = cos_ha * cos_dec * cos_lat + sin_dec * sin_lat;

    let r = libm::sqrt(x * x + y * y);
    let az = if r != 0.0 { libm::atan2(y, x) } else { 0.0 };
    let alt = libm::atan2(z, r);

    Horizontal::new(wrap_0_360(az * RAD_TO_DEG), alt * RAD_TO_DEG)
}

/// Two-part Julian date: whole days since the Unix epoch and the fraction.
fn julian_date(time: DateTime<Utc>) -> (f64, f64) {
    let seconds = time.timestamp() as f64 + time.timestamp_subsec_nanos() as f64 * 1e-9;
    let days = seconds / SECONDS_PER_DAY;
    let whole = libm::floor(days);
    (UNIX_EPOCH_JD + whole, days - whole)
}

fn earth_rotation_angle(jd1: f64, jd2: f64) -> f64 {
    let (d1, d2) = if jd1 < jd2 { (jd1, jd2) } else { (jd2, jd1) };
    let t = d1 + (d2 - J2000_JD);
    let f = libm::fmod(d1, 1.0) + libm::fmod(d2, 1.0);
    wrap_0_2pi(TWOPI * (f + 0.7790572732640 + 0.00273781191135448 * t))
}

fn gmst(jd1: f64, jd2: f64) -> f64 {
    let t = ((jd1 - J2000_JD) + jd2) / DAYS_PER_JULIAN_CENTURY;
    let polynomial_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * (-0.0000000368)))));
    wrap_0_2pi(earth_rotation_angle(jd1, jd2) + polynomial_arcsec * ARCSEC_TO_RAD)
}

fn wrap_0_2pi(rad: f64) -> f64 {
    let w = libm::fmod(rad, TWOPI);
    if w < 0.0 {
        w + TWOPI
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::wrap_pm_180;
    use chrono::TimeZone;

    fn j2000() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn julian_date_at_j2000() {
        let (jd1, jd2) = julian_date(j2000());
        assert!((jd1 + jd2 - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn gmst_at_j2000() {
        let (jd1, jd2) = julian_date(j2000());
        let hours = gmst(jd1, jd2) * RAD_TO_DEG / 15.0;
        assert!((hours - 18.697).abs() < 1e-3, "{}", hours);
    }

    #[test]
    fn sidereal_day_is_shorter() {
        let site = SiteConfig { longitude: 0.0, ..SiteConfig::rem() };
        let t0 = j2000();
        let t1 = t0 + chrono::Duration::seconds(86164);
        let a = SiderealTransform.local_sidereal_degrees(&site, t0);
        let b = SiderealTransform.local_sidereal_degrees(&site, t1);
        assert!(wrap_pm_180(b - a).abs() < 0.01, "{} vs {}", a, b);
    }

    #[test]
    fn longitude_shifts_local_time() {
        let t = j2000();
        let greenwich = SiteConfig { longitude: 0.0, ..SiteConfig::rem() };
        let lg = SiderealTransform.local_sidereal_degrees(&greenwich, t);
        let lr = SiderealTransform.local_sidereal_degrees(&SiteConfig::rem(), t);
        assert!((wrap_pm_180(lr - lg) - SiteConfig::rem().longitude).abs() < 1e-9);
    }

    #[test]
    fn meridian_star_north_of_zenith() {
        let site = SiteConfig::rem();
        let t = j2000();
        let lst = SiderealTransform.local_sidereal_degrees(&site, t);
        let pos = SiderealTransform.to_horizontal(&site, lst, site.latitude + 30.0, t);
        assert!((pos.alt - 60.0).abs() < 1e-9, "{:?}", pos);
        assert!(wrap_pm_180(pos.az).abs() < 1e-9, "{:?}", pos);
    }

    #[test]
    fn meridian_star_south_of_zenith() {
        let site = SiteConfig::rem();
        let t = j2000();
        let lst = SiderealTransform.local_sidereal_degrees(&site, t);
        let pos = SiderealTransform.to_horizontal(&site, lst, site.latitude - 30.0, t);
        assert!((pos.alt - 60.0).abs() < 1e-9, "{:?}", pos);
        assert!((pos.az - 180.0).abs() < 1e-9, "{:?}", pos);
    }

    #[test]
    fn site_round_trips_through_json() {
        let json = serde_json::to_string(&SiteConfig::rem()).unwrap();
        let back: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SiteConfig::rem());
    }

    #[test]
    fn precession_vanishes_at_j2000() {
        let (jd1, jd2) = julian_date(j2000());
        let (ra, dec) = precess_from_j2000(150.25, -20.5, jd1, jd2);
        assert!((ra - 150.25).abs() < 1e-9);
        assert!((dec + 20.5).abs() < 1e-9);
    }

    #[test]
    fn precession_to_2024() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 3, 15, 42).unwrap();
        let (jd1, jd2) = julian_date(t);
        let (ra, dec) = precess_from_j2000(150.25, -20.5, jd1, jd2);
        assert!((ra - 150.5347).abs() < 1e-3, "{}", ra);
        assert!((dec + 20.6170).abs() < 1e-3, "{}", dec);
    }

    #[test]
    fn j2000_target_is_precessed_to_frame_date() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 3, 15, 42).unwrap();
        let pos = SiderealTransform.to_horizontal(&SiteConfig::rem(), 150.25, -20.5, t);
        assert!((pos.az - 56.4604).abs() < 1e-3, "{:?}", pos);
        assert!((pos.alt - 75.4664).abs() < 1e-3, "{:?}", pos);
    }

    #[test]
    fn equator_star_rises_due_east() {
        let pos = hour_angle_to_horizontal(-90.0 * DEG_TO_RAD, 0.0, -29.0 * DEG_TO_RAD);
        assert!((pos.az - 90.0).abs() < 1e-9);
        assert!(pos.alt.abs() < 1e-9);
    }
}

use crate::coords::{Horizontal, DEG_TO_RAD, RAD_TO_DEG};

/// Great-circle separation in degrees between two horizontal positions.
///
/// Uses the Vincenty form, which stays accurate both for the sub-arcsecond
/// residuals of a good fit and for wide separations.
pub fn angular_distance(a: Horizontal, b: Horizontal) -> f64 {
    let (sin_lat1, cos_lat1) = libm::sincos(a.alt * DEG_TO_RAD);
    let (sin_lat2, cos_lat2) = libm::sincos(b.alt * DEG_TO_RAD);
    let delta_lon = (b.az - a.az) * DEG_TO_RAD;
    let (sin_dlon, cos_dlon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_dlon).powi(2) + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    libm::atan2(num, den) * RAD_TO_DEG
}

pub fn angular_distance_sum<'a, I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (&'a Horizontal, &'a Horizontal)>,
{
    pairs.into_iter().map(|(a, b)| angular_distance(*a, *b)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_positions_are_zero() {
        let p = Horizontal::new(123.4, 56.7);
        assert_eq!(angular_distance(p, p), 0.0);
    }

    #[test]
    fn along_meridian_is_altitude_difference() {
        let d = angular_distance(Horizontal::new(40.0, 10.0), Horizontal::new(40.0, 35.0));
        assert!((d - 25.0).abs() < 1e-10);
    }

    #[test]
    fn along_horizon_is_azimuth_difference() {
        let d = angular_distance(Horizontal::new(350.0, 0.0), Horizontal::new(10.0, 0.0));
        assert!((d - 20.0).abs() < 1e-10);
    }

    #[test]
    fn azimuth_shrinks_with_cos_altitude() {
        let alt: f64 = 60.0;
        let d = angular_distance(Horizontal::new(0.0, alt), Horizontal::new(1.0 / 3600.0, alt));
        let expected = (1.0 / 3600.0) * (alt * DEG_TO_RAD).cos();
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn symmetric() {
        let a = Horizontal::new(12.0, 33.0);
        let b = Horizontal::new(200.0, -5.0);
        assert!((angular_distance(a, b) - angular_distance(b, a)).abs() < 1e-12);
    }

    #[test]
    fn antipodal_is_180() {
        let d = angular_distance(Horizontal::new(0.0, 0.0), Horizontal::new(180.0, 0.0));
        assert!((d - 180.0).abs() < 1e-10);
    }

    #[test]
    fn sum_over_pairs() {
        let a = [Horizontal::new(0.0, 10.0), Horizontal::new(0.0, 20.0)];
        let b = [Horizontal::new(0.0, 11.0), Horizontal::new(0.0, 22.0)];
        let total = angular_distance_sum(a.iter().zip(b.iter()));
        assert!((total - 3.0).abs() < 1e-10);
    }
}

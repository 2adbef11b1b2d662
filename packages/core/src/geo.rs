//! Great-circle distance between two latitude/longitude points.
//!
//! Single haversine implementation used by both the monitor and the read
//! path, so radius queries and tests agree on distances exactly.

/// Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(48.856614, 2.3522219, 48.856614, 2.3522219), 0.0);
    }

    #[test]
    fn paris_to_lyon_is_about_392_km() {
        let d = distance_km(48.8566, 2.3522, 45.7640, 4.8357);
        assert!((d - 392.0).abs() < 2.0, "got {} km", d);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(48.8566, 2.3522, 43.296482, 5.36978);
        let back = distance_km(43.296482, 5.36978, 48.8566, 2.3522);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn equator_quarter_turn_matches_analytic_value() {
        // 90° of longitude along the equator is a quarter circumference.
        let d = distance_km(0.0, 0.0, 0.0, 90.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
    }
}

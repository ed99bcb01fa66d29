//! Great-circle helpers shared by the matching, storm, and equipment agents.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;
const MILES_PER_DEGREE_LATITUDE: f64 = 69.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinates out of range (latitude {latitude}, longitude {longitude})")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let point = Self {
            latitude,
            longitude,
        };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(GeoError::OutOfRange {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        haversine_miles(*self, *other)
    }
}

pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

/// Point `fraction * radius_miles` away from `center` along `bearing_deg`.
///
/// Uses a flat-earth projection, which is accurate enough for storm-sized radii.
pub fn offset_within(
    center: Coordinates,
    radius_miles: f64,
    bearing_deg: f64,
    fraction: f64,
) -> Coordinates {
    let distance = radius_miles.max(0.0) * fraction.clamp(0.0, 1.0);
    let bearing = bearing_deg.to_radians();
    let north = distance * bearing.cos();
    let east = distance * bearing.sin();

    let latitude = (center.latitude + north / MILES_PER_DEGREE_LATITUDE).clamp(-90.0, 90.0);
    let miles_per_degree_longitude =
        (MILES_PER_DEGREE_LATITUDE * center.latitude.to_radians().cos()).max(f64::EPSILON);
    let longitude = (center.longitude + east / miles_per_degree_longitude).clamp(-180.0, 180.0);

    Coordinates {
        latitude,
        longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn des_moines() -> Coordinates {
        Coordinates::new(41.5868, -93.6250).expect("valid")
    }

    fn ames() -> Coordinates {
        Coordinates::new(42.0347, -93.6199).expect("valid")
    }

    #[test]
    fn haversine_is_zero_for_identical_points() {
        assert_eq!(haversine_miles(des_moines(), des_moines()), 0.0);
    }

    #[test]
    fn haversine_matches_known_distance() {
        let distance = haversine_miles(des_moines(), ames());
        assert!((distance - 30.9).abs() < 0.5, "got {distance}");
        assert!((distance - haversine_miles(ames(), des_moines())).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn offset_stays_inside_radius() {
        let center = des_moines();
        for bearing in [0.0, 45.0, 135.0, 270.0] {
            let point = offset_within(center, 10.0, bearing, 1.0);
            let distance = haversine_miles(center, point);
            assert!((distance - 10.0).abs() < 0.2, "bearing {bearing}: {distance}");
        }
        assert_eq!(offset_within(center, 10.0, 90.0, 0.0), center);
    }
}

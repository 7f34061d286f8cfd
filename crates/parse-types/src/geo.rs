use std::fmt;

use crate::error::{TypeError, TypeResult};

const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;
const EARTH_MEAN_RADIUS_MILES: f64 = 3958.8;

/// A latitude/longitude pair in degrees.
///
/// Construction validates ranges, so every `GeoPoint` is finite and on the
/// globe.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates off the globe.
    pub fn new(latitude: f64, longitude: f64) -> TypeResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TypeError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TypeError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in radians (haversine).
    pub fn distance_in_radians(&self, other: &GeoPoint) -> f64 {
        let (lat1, lon1) = (self.latitude.to_radians(), self.longitude.to_radians());
        let (lat2, lon2) = (other.latitude.to_radians(), other.longitude.to_radians());

        let half_dlat = ((lat2 - lat1) / 2.0).sin();
        let half_dlon = ((lon2 - lon1) / 2.0).sin();
        let a = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
        2.0 * a.sqrt().min(1.0).asin()
    }

    pub fn distance_in_kilometers(&self, other: &GeoPoint) -> f64 {
        self.distance_in_radians(other) * EARTH_MEAN_RADIUS_KM
    }

    pub fn distance_in_miles(&self, other: &GeoPoint) -> f64 {
        self.distance_in_radians(other) * EARTH_MEAN_RADIUS_MILES
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_extremes() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(TypeError::InvalidLatitude(90.5))
        );
        assert_eq!(
            GeoPoint::new(0.0, -181.0),
            Err(TypeError::InvalidLongitude(-181.0))
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(52.37, 4.89).unwrap();
        assert_eq!(p.distance_in_radians(&p), 0.0);
    }

    #[test]
    fn pole_to_pole_is_pi() {
        let north = GeoPoint::new(90.0, 0.0).unwrap();
        let south = GeoPoint::new(-90.0, 0.0).unwrap();
        assert!((north.distance_in_radians(&south) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn kilometers_between_cities() {
        let amsterdam = GeoPoint::new(52.3676, 4.9041).unwrap();
        let paris = GeoPoint::new(48.8566, 2.3522).unwrap();
        let km = amsterdam.distance_in_kilometers(&paris);
        assert!((km - 430.0).abs() < 10.0, "got {km}");
        assert!(amsterdam.distance_in_miles(&paris) < km);
    }

    #[test]
    fn debug_format() {
        let p = GeoPoint::new(1.5, -2.0).unwrap();
        assert_eq!(format!("{p:?}"), "GeoPoint(1.5, -2)");
    }
}

//! Geographic positions and great-circle distance.

use std::fmt;

use super::DomainError;

/// Mean Earth radius in kilometres, used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated geographic position in decimal degrees.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], and both
/// are finite. Code that receives a `Coordinate` can rely on those
/// bounds, so distance calculations never see NaN or infinity.
///
/// # Examples
///
/// ```
/// use sale_server::domain::Coordinate;
///
/// let home = Coordinate::new(64.8378, -147.7164).unwrap();
/// assert_eq!(home.lat(), 64.8378);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Validate a latitude/longitude pair in decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() {
            return Err(DomainError::InvalidCoordinate {
                reason: "latitude must be a finite number",
            });
        }
        if !lon.is_finite() {
            return Err(DomainError::InvalidCoordinate {
                reason: "longitude must be a finite number",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate {
                reason: "latitude out of range [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate {
                reason: "longitude out of range [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in kilometres.
    ///
    /// Haversine formula in its `atan2` form, which stays numerically
    /// stable for nearby points. This is straight-line distance over the
    /// sphere: no roads, no terrain.
    ///
    /// # Examples
    ///
    /// ```
    /// use sale_server::domain::Coordinate;
    ///
    /// let a = Coordinate::new(0.0, 0.0).unwrap();
    /// let b = Coordinate::new(0.0, 1.0).unwrap();
    /// assert!((a.distance_km(b) - 111.19).abs() < 0.01);
    /// ```
    pub fn distance_km(&self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

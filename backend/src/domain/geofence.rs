//! Geofence value objects and great-circle containment checks.
//!
//! Clock-in and clock-out mutations are gated on whether the caretaker's
//! reported position lies within the organisation's anchor radius. The check
//! is a pure haversine distance comparison; coordinate validity is enforced
//! at construction so containment itself cannot fail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validation errors returned by the geofence constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceValidationError {
    /// Latitude was non-finite or outside [-90, 90] degrees.
    LatitudeOutOfRange {
        /// Offending input value.
        value: f64,
    },
    /// Longitude was non-finite or outside [-180, 180] degrees.
    LongitudeOutOfRange {
        /// Offending input value.
        value: f64,
    },
    /// Radius was non-finite or negative.
    InvalidRadius {
        /// Offending input value.
        value: f64,
    },
}

impl fmt::Display for GeofenceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude must be a finite value in [-90, 90], got {value}")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(
                    f,
                    "longitude must be a finite value in [-180, 180], got {value}"
                )
            }
            Self::InvalidRadius { value } => {
                write!(f, "radius must be a finite value >= 0 km, got {value}")
            }
        }
    }
}

impl std::error::Error for GeofenceValidationError {}

#[rustfmt::skip]
fn valid_latitude(value: f64) -> bool { value.is_finite() && (-90.0..=90.0).contains(&value) }

#[rustfmt::skip]
fn valid_longitude(value: f64) -> bool { value.is_finite() && (-180.0..=180.0).contains(&value) }

/// A validated geographic coordinate pair in decimal degrees.
///
/// ## Invariants
/// - `latitude` is finite and within [-90, 90].
/// - `longitude` is finite and within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointDto", into = "GeoPointDto")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a coordinate pair.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::GeoPoint;
    ///
    /// let point = GeoPoint::new(51.5072, -0.1276).expect("valid point");
    /// assert_eq!(point.latitude(), 51.5072);
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeofenceValidationError> {
        if !valid_latitude(latitude) {
            return Err(GeofenceValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !valid_longitude(longitude) {
            return Err(GeofenceValidationError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoPointDto {
    latitude: f64,
    longitude: f64,
}

impl From<GeoPoint> for GeoPointDto {
    fn from(value: GeoPoint) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<GeoPointDto> for GeoPoint {
    type Error = GeofenceValidationError;

    fn try_from(value: GeoPointDto) -> Result<Self, Self::Error> {
        GeoPoint::new(value.latitude, value.longitude)
    }
}

/// Great-circle distance between two points, in kilometres.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
/// ```
/// use backend::domain::{haversine_distance_km, GeoPoint};
///
/// let origin = GeoPoint::new(0.0, 0.0).expect("valid point");
/// let one_degree_north = GeoPoint::new(1.0, 0.0).expect("valid point");
/// let distance = haversine_distance_km(&origin, &one_degree_north);
/// assert!((distance - 111.19).abs() < 0.01);
/// ```
pub fn haversine_distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let half_chord = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// The organisation-wide geofence: a centre point plus radius in kilometres.
///
/// Exactly one anchor exists per organisation. A radius of zero is legal and
/// means no position is ever in range.
///
/// ## Invariants
/// - `radius_km` is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnchorLocationDto", into = "AnchorLocationDto")]
pub struct AnchorLocation {
    center: GeoPoint,
    radius_km: f64,
}

impl AnchorLocation {
    /// Validate and construct an anchor.
    pub fn new(center: GeoPoint, radius_km: f64) -> Result<Self, GeofenceValidationError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(GeofenceValidationError::InvalidRadius { value: radius_km });
        }
        Ok(Self { center, radius_km })
    }

    /// Centre of the geofence.
    pub fn center(&self) -> &GeoPoint {
        &self.center
    }

    /// Radius of the geofence in kilometres.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Whether `position` lies within the geofence.
    ///
    /// The boundary is closed: a position exactly `radius_km` away counts as
    /// in range.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AnchorLocation, GeoPoint};
    ///
    /// let center = GeoPoint::new(0.0, 0.0).expect("valid point");
    /// let anchor = AnchorLocation::new(center, 111.195).expect("valid anchor");
    /// let nearby = GeoPoint::new(1.0, 0.0).expect("valid point");
    /// assert!(anchor.contains(&nearby));
    /// ```
    pub fn contains(&self, position: &GeoPoint) -> bool {
        haversine_distance_km(&self.center, position) <= self.radius_km
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnchorLocationDto {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
}

impl From<AnchorLocation> for AnchorLocationDto {
    fn from(value: AnchorLocation) -> Self {
        Self {
            latitude: value.center.latitude(),
            longitude: value.center.longitude(),
            radius_km: value.radius_km,
        }
    }
}

impl TryFrom<AnchorLocationDto> for AnchorLocation {
    type Error = GeofenceValidationError;

    fn try_from(value: AnchorLocationDto) -> Result<Self, Self::Error> {
        let center = GeoPoint::new(value.latitude, value.longitude)?;
        AnchorLocation::new(center, value.radius_km)
    }
}

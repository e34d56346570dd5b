//! Geographic readout: convert the camera's view direction into the
//! latitude and longitude it is looking at.

use glam::Vec3;

/// A latitude/longitude pair in degrees, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    /// Latitude in degrees, positive north.
    pub lat: f32,
    /// Longitude in degrees, positive toward +X.
    pub lon: f32,
}

impl GeoCoord {
    /// Coordinates the camera is looking toward, from its forward
    /// `direction` (need not be normalized).
    ///
    /// Ignores the globe's own spin: longitude is measured in world space,
    /// with the +Z meridian at zero. A camera on +Z aimed at the globe
    /// center therefore reads longitude 180.
    pub fn from_view_direction(direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        let lat = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = dir.x.atan2(dir.z).to_degrees();
        Self {
            lat: round2(lat),
            lon: round2(lon),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

//! Cartesian state vectors and their ecliptic angles.
//!
//! Horizons hands back kilometers in the ecliptic/J2000 frame. Longitude and
//! latitude are derived here once and consumed by the classifier; both are
//! defined for every finite input, including the zero vector.

use serde::{Deserialize, Serialize};

/// A position vector in kilometers, ecliptic/J2000 frame.
///
/// Serializes as a bare `[x, y, z]` triple to match the stored and
/// on-the-wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Ecliptic longitude in degrees, always in `[0, 360)`.
    ///
    /// `rem_euclid` folds negative atan2 results of any magnitude into
    /// range, not just a single wrap.
    pub fn ecliptic_longitude_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees().rem_euclid(360.0)
    }

    /// Ecliptic latitude in degrees, in `[-90, 90]`. The zero vector has no
    /// direction and maps to 0 rather than dividing by zero.
    pub fn ecliptic_latitude_deg(&self) -> f64 {
        let norm = self.norm();
        if norm == 0.0 {
            return 0.0;
        }
        (self.z / norm).clamp(-1.0, 1.0).asin().to_degrees()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_cardinal_axes() {
        assert_eq!(Vector3::new(1.0, 0.0, 0.0).ecliptic_longitude_deg(), 0.0);
        assert_eq!(Vector3::new(0.0, 1.0, 0.0).ecliptic_longitude_deg(), 90.0);
        assert_eq!(Vector3::new(-1.0, 0.0, 0.0).ecliptic_longitude_deg(), 180.0);
        assert_eq!(Vector3::new(0.0, -1.0, 0.0).ecliptic_longitude_deg(), 270.0);
    }

    #[test]
    fn longitude_always_in_range() {
        let samples = [
            Vector3::new(-3.7e8, -2.1e8, 5.0e4),
            Vector3::new(1.0, -1e-9, 0.0),
            Vector3::new(-0.5, 0.5, 12.0),
            Vector3::new(7.3e7, -1.4e8, -9.9e3),
        ];
        for v in samples {
            let lon = v.ecliptic_longitude_deg();
            assert!((0.0..360.0).contains(&lon), "longitude {lon} out of range");
        }
    }

    #[test]
    fn latitude_poles_and_origin() {
        assert_eq!(Vector3::new(0.0, 0.0, 5.0).ecliptic_latitude_deg(), 90.0);
        assert_eq!(Vector3::new(0.0, 0.0, -5.0).ecliptic_latitude_deg(), -90.0);
        assert_eq!(Vector3::ZERO.ecliptic_latitude_deg(), 0.0);
    }

    #[test]
    fn latitude_in_plane_is_zero() {
        let lat = Vector3::new(1.5e8, -2.0e7, 0.0).ecliptic_latitude_deg();
        assert!(lat.abs() < 1e-12);
    }

    #[test]
    fn serializes_as_triple() {
        let v = Vector3::new(1.0, 2.5, -3.0);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.5,-3.0]");
        let back: Vector3 = serde_json::from_str("[1.0,2.5,-3.0]").unwrap();
        assert_eq!(back, v);
    }
}

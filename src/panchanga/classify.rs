//! Classification of ecliptic angles into calendar categories.
//!
//! All functions are pure. Longitudes are folded into `[0, 360)` before
//! sector division, and every table index is clamped to its last entry so
//! an input of exactly 360 degrees can never read out of range.

use super::types::{
    Ayana, Grahana, Masa, Phase, Rashi, Ritu, TithiInfo, MASAS, RASHIS, RITUS, TITHIS,
};

/// Elongation window around conjunction/opposition inside which an eclipse
/// is geometrically possible. Approximate screen, not a predictor.
pub const GRAHANA_SYZYGY_WINDOW_DEG: f64 = 1.0;

/// Lunar ecliptic-latitude window around the nodes for the same screen.
pub const GRAHANA_NODE_WINDOW_DEG: f64 = 0.5;

/// Moon-Sun elongation in degrees, always in `[0, 360)`.
pub fn lunar_solar_angle_deg(chandra_lon_deg: f64, surya_lon_deg: f64) -> f64 {
    (chandra_lon_deg - surya_lon_deg).rem_euclid(360.0)
}

fn sector_index(lon_deg: f64, sector_width_deg: f64, last: usize) -> usize {
    let lon = lon_deg.rem_euclid(360.0);
    ((lon / sector_width_deg).floor() as usize).min(last)
}

/// Tithi for an elongation angle: 12 degrees per tithi, clamped to
/// Amavasya at the top of the range.
pub fn tithi_for_angle(angle_deg: f64) -> TithiInfo {
    TITHIS[sector_index(angle_deg, 12.0, 29)]
}

/// Masa from solar longitude, 30 degrees per month.
pub fn masa_for_longitude(surya_lon_deg: f64) -> Masa {
    MASAS[sector_index(surya_lon_deg, 30.0, 11)]
}

/// Rashi for any ecliptic longitude, 30 degrees per sign.
pub fn rashi_for_longitude(lon_deg: f64) -> Rashi {
    RASHIS[sector_index(lon_deg, 30.0, 11)]
}

/// Ayana from solar longitude: Uttarayana on `[270, 360) ∪ [0, 90)`.
pub fn ayana_for_longitude(surya_lon_deg: f64) -> Ayana {
    let lon = surya_lon_deg.rem_euclid(360.0);
    if lon >= 270.0 || lon < 90.0 {
        Ayana::Uttarayana
    } else {
        Ayana::Dakshinayana
    }
}

/// Ritu from solar longitude: six 60-degree sectors anchored at 0 degrees
/// Mesha (Vasanta = [0, 60)).
///
/// Some panchanga traditions anchor the seasons at 330 degrees instead, so
/// Vasanta spans Meena-Mesha; this implementation uses the symmetric
/// 0-anchored partition.
pub fn ritu_for_longitude(surya_lon_deg: f64) -> Ritu {
    RITUS[sector_index(surya_lon_deg, 60.0, 5)]
}

/// Lunar phase: waxing on the first half-turn of elongation.
pub fn phase_for_angle(angle_deg: f64) -> Phase {
    if angle_deg < 180.0 {
        Phase::Waxing
    } else {
        Phase::Waning
    }
}

/// Geometric eclipse screen.
///
/// An eclipse is flagged when the Moon is close to conjunction (solar) or
/// opposition (lunar) while also close to the ecliptic plane. This ignores
/// angular diameters and parallax; it marks possibility, not certainty.
pub fn grahana_screen(angle_deg: f64, chandra_lat_deg: f64) -> Grahana {
    let near_conjunction = angle_deg < GRAHANA_SYZYGY_WINDOW_DEG
        || angle_deg > 360.0 - GRAHANA_SYZYGY_WINDOW_DEG;
    let near_opposition = (angle_deg - 180.0).abs() < GRAHANA_SYZYGY_WINDOW_DEG;
    let near_node = chandra_lat_deg.abs() < GRAHANA_NODE_WINDOW_DEG;

    if near_conjunction && near_node {
        Grahana::Surya
    } else if near_opposition && near_node {
        Grahana::Chandra
    } else {
        Grahana::None
    }
}

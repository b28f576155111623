//! Wire and storage models for computed calendar data.

use serde::{Deserialize, Serialize};

use crate::ephemeris::Vector3;
use crate::panchanga::types::{Ayana, Grahana, Masa, Paksha, Phase, Rashi, Ritu, TithiName};

/// A satisfied observance: the rule's name and human description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpavaasInfo {
    pub name: String,
    pub description: String,
}

/// Everything derived for one instant. Immutable once computed; the only
/// thing that ever happens to a record afterwards is placement into the
/// cache and the ledger under its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRecord {
    /// Canonical instant identifier, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
    pub key: String,

    pub ayana: Ayana,
    pub ritu: Ritu,
    pub masa: Masa,
    pub paksha: Paksha,
    pub tithi: TithiName,
    pub phase: Phase,

    pub surya_rashi: Rashi,
    pub chandra_rashi: Rashi,

    pub surya_longitude_deg: f64,
    pub chandra_longitude_deg: f64,
    pub longitudinal_angle_deg: f64,

    pub grahana: Grahana,

    pub surya_xyz: Vector3,
    pub chandra_xyz: Vector3,

    pub upavaas: Vec<UpavaasInfo>,
}

/// Raw heliocentric position of one body, no classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub name: String,
    pub xyz: Vector3,
    pub longitude_deg: f64,
}

/// A full planet snapshot for one (midnight-normalized) instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetsSnapshot {
    pub key: String,
    pub planets: Vec<PlanetPosition>,
}

//! The derivation engine: two state vectors in, one calendar record out.

use std::sync::Arc;

use crate::ephemeris::{Body, Center, VectorSource};
use crate::error::Result;
use crate::instant::QueryInstant;
use crate::record::CalendarRecord;

use super::classify;
use super::upavaas;

/// Composes vector acquisition, coordinate conversion, classification, and
/// observance resolution. Deterministic given identical vectors; the only
/// effects are the two geocentric fetches.
pub struct PanchangaEngine {
    source: Arc<dyn VectorSource>,
}

impl PanchangaEngine {
    pub fn new(source: Arc<dyn VectorSource>) -> Self {
        Self { source }
    }

    /// Compute the full record for an instant. Either fetch failing aborts
    /// the call; no partial record is ever assembled.
    pub async fn compute(&self, instant: &QueryInstant) -> Result<CalendarRecord> {
        let surya_xyz = self
            .source
            .fetch(Body::Sun, Center::Geocentric, instant)
            .await?;
        let chandra_xyz = self
            .source
            .fetch(Body::Moon, Center::Geocentric, instant)
            .await?;

        let surya_longitude_deg = surya_xyz.ecliptic_longitude_deg();
        let chandra_longitude_deg = chandra_xyz.ecliptic_longitude_deg();
        let chandra_latitude_deg = chandra_xyz.ecliptic_latitude_deg();

        let longitudinal_angle_deg =
            classify::lunar_solar_angle_deg(chandra_longitude_deg, surya_longitude_deg);

        let tithi = classify::tithi_for_angle(longitudinal_angle_deg);
        let masa = classify::masa_for_longitude(surya_longitude_deg);
        let upavaas = upavaas::resolve(tithi.name, tithi.paksha, masa, surya_longitude_deg);

        Ok(CalendarRecord {
            key: instant.key(),
            ayana: classify::ayana_for_longitude(surya_longitude_deg),
            ritu: classify::ritu_for_longitude(surya_longitude_deg),
            masa,
            paksha: tithi.paksha,
            tithi: tithi.name,
            phase: classify::phase_for_angle(longitudinal_angle_deg),
            surya_rashi: classify::rashi_for_longitude(surya_longitude_deg),
            chandra_rashi: classify::rashi_for_longitude(chandra_longitude_deg),
            surya_longitude_deg,
            chandra_longitude_deg,
            longitudinal_angle_deg,
            grahana: classify::grahana_screen(longitudinal_angle_deg, chandra_latitude_deg),
            surya_xyz,
            chandra_xyz,
            upavaas,
        })
    }
}

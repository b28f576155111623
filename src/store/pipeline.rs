//! The read-through lookup pipeline.
//!
//! `get_or_compute` is the single entry point the HTTP layer uses for
//! calendar data: memory cache, then ledger, then the engine, writing back
//! to both stores on a miss. Writes are upserts of deterministic output, so
//! concurrent misses on one key converge on an equivalent row without a
//! per-key lock.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ephemeris::{Center, Vector3, VectorSource, SNAPSHOT_BODIES};
use crate::error::Result;
use crate::instant::QueryInstant;
use crate::panchanga::PanchangaEngine;
use crate::record::{CalendarRecord, PlanetPosition, PlanetsSnapshot};

use super::cache::TtlCache;
use super::ledger::Ledger;

/// Default cache time-to-live: half a day, matching the cadence at which a
/// tithi can plausibly change.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Default bound on entries per cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Facade over the engine, the memory caches, and the durable ledger.
///
/// The calendar cache and the planet-snapshot cache are separate instances,
/// so the two pipelines can never collide on a key.
pub struct CalendarService {
    engine: PanchangaEngine,
    source: Arc<dyn VectorSource>,
    ledger: Arc<dyn Ledger>,
    calendar_cache: TtlCache<CalendarRecord>,
    planets_cache: TtlCache<PlanetsSnapshot>,
}

impl CalendarService {
    pub fn new(
        source: Arc<dyn VectorSource>,
        ledger: Arc<dyn Ledger>,
        cache_ttl: Duration,
        cache_capacity: usize,
    ) -> Self {
        Self {
            engine: PanchangaEngine::new(source.clone()),
            source,
            ledger,
            calendar_cache: TtlCache::new(cache_ttl, cache_capacity),
            planets_cache: TtlCache::new(cache_ttl, cache_capacity),
        }
    }

    /// Three-step lookup: cache, ledger, engine. Ledger read failures
    /// degrade to a miss; ledger write failures degrade to serving the
    /// computed record unpersisted.
    pub async fn get_or_compute(&self, key: &str) -> Result<CalendarRecord> {
        let instant = QueryInstant::parse(key)?;
        let key = instant.key();

        if let Some(record) = self.calendar_cache.get(&key).await {
            debug!(%key, "calendar cache hit");
            return Ok(record);
        }

        match self.ledger.get_by_key(&key).await {
            Ok(Some(record)) => {
                debug!(%key, "ledger hit");
                self.calendar_cache.insert(key.as_str(), record.clone()).await;
                return Ok(record);
            }
            Ok(None) => {}
            Err(e) => warn!(%key, error = %e, "ledger read failed, recomputing"),
        }

        let record = self.engine.compute(&instant).await?;
        if let Err(e) = self.ledger.upsert(&record).await {
            warn!(%key, error = %e, "ledger write failed, serving unpersisted record");
        }
        self.calendar_cache.insert(key, record.clone()).await;
        Ok(record)
    }

    /// Direct engine invocation, bypassing cache and ledger entirely.
    pub async fn compute_calendar(&self, instant: &str) -> Result<CalendarRecord> {
        let instant = QueryInstant::parse(instant)?;
        self.engine.compute(&instant).await
    }

    /// Heliocentric snapshot of the fixed body set, memory-cached under the
    /// instant's midnight key. Never touches the ledger.
    pub async fn list_planets(&self, instant: &str) -> Result<PlanetsSnapshot> {
        let midnight = QueryInstant::parse(instant)?.midnight();
        let key = midnight.key();

        if let Some(snapshot) = self.planets_cache.get(&key).await {
            debug!(%key, "planet snapshot cache hit");
            return Ok(snapshot);
        }

        // The Sun is the origin of the heliocentric frame; no fetch needed.
        let mut planets = vec![PlanetPosition {
            name: "Sun".to_string(),
            xyz: Vector3::ZERO,
            longitude_deg: 0.0,
        }];
        for body in SNAPSHOT_BODIES {
            let xyz = self
                .source
                .fetch(body, Center::Heliocentric, &midnight)
                .await?;
            planets.push(PlanetPosition {
                name: body.name().to_string(),
                longitude_deg: xyz.ecliptic_longitude_deg(),
                xyz,
            });
        }

        let snapshot = PlanetsSnapshot {
            key: key.clone(),
            planets,
        };
        self.planets_cache.insert(key, snapshot.clone()).await;
        Ok(snapshot)
    }
}

//! End-to-end pipeline tests against the public crate API, with a
//! deterministic stub in place of the Horizons client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::Connection;
use tempfile::NamedTempFile;

use lunar_panchanga::ephemeris::{Body, Center};
use lunar_panchanga::error::{PanchangaError, Result};
use lunar_panchanga::panchanga::types::{Paksha, Phase, TithiName};
use lunar_panchanga::{
    CalendarRecord, CalendarService, Ledger, QueryInstant, SqliteLedger, Vector3, VectorSource,
};

/// Serves fixed Sun/Moon vectors and counts every fetch.
struct StubSource {
    sun: Vector3,
    moon: Vector3,
    fetches: AtomicUsize,
}

impl StubSource {
    fn new(sun: Vector3, moon: Vector3) -> Arc<Self> {
        Arc::new(Self {
            sun,
            moon,
            fetches: AtomicUsize::new(0),
        })
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorSource for StubSource {
    async fn fetch(&self, body: Body, _center: Center, _instant: &QueryInstant) -> Result<Vector3> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match body {
            Body::Sun => Ok(self.sun),
            Body::Moon => Ok(self.moon),
            // Heliocentric snapshot bodies get an arbitrary fixed vector.
            _ => Ok(Vector3::new(1.0e8, 1.0e8, 0.0)),
        }
    }
}

/// A source that is always down.
struct OutageSource;

#[async_trait]
impl VectorSource for OutageSource {
    async fn fetch(
        &self,
        _body: Body,
        _center: Center,
        _instant: &QueryInstant,
    ) -> Result<Vector3> {
        Err(PanchangaError::ServiceUnavailable("stub outage".into()))
    }
}

/// A ledger whose every operation fails.
struct BrokenLedger;

#[async_trait]
impl Ledger for BrokenLedger {
    async fn get_by_key(&self, _key: &str) -> Result<Option<CalendarRecord>> {
        Err(PanchangaError::Storage("broken ledger".into()))
    }

    async fn upsert(&self, _record: &CalendarRecord) -> Result<()> {
        Err(PanchangaError::Storage("broken ledger".into()))
    }
}

fn default_stub() -> Arc<StubSource> {
    StubSource::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))
}

fn service_with(source: Arc<dyn VectorSource>, ledger: Arc<dyn Ledger>) -> CalendarService {
    CalendarService::new(source, ledger, Duration::from_secs(3600), 16)
}

#[tokio::test]
async fn miss_path_end_to_end() {
    let temp = NamedTempFile::new().unwrap();
    let ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());
    let source = default_stub();
    let service = service_with(source.clone(), ledger);

    let record = service.get_or_compute("2026-01-20").await.unwrap();

    assert_eq!(record.key, "2026-01-20");
    assert_eq!(record.surya_longitude_deg, 0.0);
    assert_eq!(record.chandra_longitude_deg, 90.0);
    assert_eq!(record.longitudinal_angle_deg, 90.0);
    assert_eq!(record.tithi, TithiName::Ashtami);
    assert_eq!(record.paksha, Paksha::Shukla);
    assert_eq!(record.phase, Phase::Waxing);
    assert!(record.upavaas.iter().any(|u| u.name == "Ashtami"));
    // One fetch for the Sun, one for the Moon.
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn repeated_lookup_is_idempotent_and_cached() {
    let temp = NamedTempFile::new().unwrap();
    let ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());
    let source = default_stub();
    let service = service_with(source.clone(), ledger);

    let first = service.get_or_compute("2026-01-20").await.unwrap();
    let second = service.get_or_compute("2026-01-20").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    // The second call was served from the memory cache.
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn ledger_hit_skips_recomputation() {
    let temp = NamedTempFile::new().unwrap();

    let writer_ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());
    let writer_source = default_stub();
    let writer = service_with(writer_source, writer_ledger);
    let stored = writer.get_or_compute("2026-01-20").await.unwrap();

    // Fresh service over the same database: cold cache, warm ledger.
    let reader_ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());
    let reader_source = default_stub();
    let reader = service_with(reader_source.clone(), reader_ledger);
    let loaded = reader.get_or_compute("2026-01-20").await.unwrap();

    assert_eq!(loaded, stored);
    assert_eq!(reader_source.fetch_count(), 0);
}

#[tokio::test]
async fn null_upavaas_row_forces_recomputation() {
    let temp = NamedTempFile::new().unwrap();
    let ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());

    let conn = Connection::open(temp.path()).unwrap();
    conn.execute(
        "INSERT INTO lunar_ephemeris (
            key, ayana, ritu, masa, paksha, tithi, phase,
            surya_rashi, chandra_rashi,
            surya_longitude_deg, chandra_longitude_deg,
            longitudinal_angle_deg, grahana, surya_xyz, chandra_xyz,
            upavaas, created_at
         ) VALUES (
            '2026-01-20', 'Uttarayana', 'Vasanta', 'Chaitra', 'Shukla Paksha',
            'Pratipada', 'Waxing', 'Mesha', 'Mesha',
            1.0, 2.0, 1.0, 'None', '[1.0,0.0,0.0]', '[0.0,1.0,0.0]',
            NULL, '2026-01-19T00:00:00Z'
         )",
        [],
    )
    .unwrap();
    drop(conn);

    let source = default_stub();
    let service = service_with(source.clone(), ledger.clone());
    let record = service.get_or_compute("2026-01-20").await.unwrap();

    // The legacy row was ignored and a complete record recomputed.
    assert_eq!(source.fetch_count(), 2);
    assert_eq!(record.tithi, TithiName::Ashtami);
    assert!(!record.upavaas.is_empty());

    // The recomputed record replaced the legacy row.
    let reloaded = ledger.get_by_key("2026-01-20").await.unwrap().unwrap();
    assert_eq!(reloaded, record);
}

#[tokio::test]
async fn broken_ledger_still_serves_records() {
    let source = default_stub();
    let service = service_with(source.clone(), Arc::new(BrokenLedger));

    let record = service.get_or_compute("2026-01-20").await.unwrap();
    assert_eq!(record.tithi, TithiName::Ashtami);

    // Second call hits the memory cache despite storage being down.
    let again = service.get_or_compute("2026-01-20").await.unwrap();
    assert_eq!(record, again);
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn provider_outage_propagates_and_stores_nothing() {
    let temp = NamedTempFile::new().unwrap();
    let ledger = Arc::new(SqliteLedger::new(temp.path()).await.unwrap());
    let service = service_with(Arc::new(OutageSource), ledger.clone());

    let err = service.get_or_compute("2026-01-20").await.unwrap_err();
    assert!(matches!(err, PanchangaError::ServiceUnavailable(_)));

    // No partial record was cached or persisted.
    assert!(ledger.get_by_key("2026-01-20").await.unwrap().is_none());
    let err = service.get_or_compute("2026-01-20").await.unwrap_err();
    assert!(matches!(err, PanchangaError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn malformed_key_is_rejected_before_any_fetch() {
    let source = default_stub();
    let service = service_with(source.clone(), Arc::new(BrokenLedger));

    for bad in ["2026-1-2", "20-01-2026", "2026-01-20T10:00", "soon"] {
        let err = service.get_or_compute(bad).await.unwrap_err();
        assert!(matches!(err, PanchangaError::InvalidArgument(_)), "{bad}");
    }
    assert_eq!(source.fetch_count(), 0);
}

#[tokio::test]
async fn compute_calendar_bypasses_cache_and_ledger() {
    let source = default_stub();
    let service = service_with(source.clone(), Arc::new(BrokenLedger));

    let a = service.compute_calendar("2026-01-20T06:00:00").await.unwrap();
    let b = service.compute_calendar("2026-01-20T06:00:00").await.unwrap();

    assert_eq!(a, b);
    assert_eq!(a.key, "2026-01-20T06:00:00");
    // Two fetches per call: nothing was cached.
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn planet_snapshot_is_cached_by_midnight_key() {
    let source = default_stub();
    let service = service_with(source.clone(), Arc::new(BrokenLedger));

    let morning = service.list_planets("2026-01-20T06:00:00").await.unwrap();
    let evening = service.list_planets("2026-01-20T21:30:00").await.unwrap();

    assert_eq!(morning.key, "2026-01-20T00:00:00");
    assert_eq!(morning, evening);

    // Eight heliocentric fetches total; the Sun itself is the origin.
    assert_eq!(source.fetch_count(), 8);
    assert_eq!(morning.planets.len(), 9);
    assert_eq!(morning.planets[0].name, "Sun");
    assert_eq!(morning.planets[0].xyz, Vector3::ZERO);
    assert!(morning.planets.iter().any(|p| p.name == "Jupiter"));
}

#[tokio::test]
async fn planet_snapshot_does_not_touch_calendar_cache() {
    let source = default_stub();
    let service = service_with(source.clone(), Arc::new(BrokenLedger));

    let _ = service.list_planets("2026-01-20").await.unwrap();
    let before = source.fetch_count();

    // The calendar lookup must compute its own record even though the
    // snapshot pipeline already cached something for this day.
    let record = service.get_or_compute("2026-01-20").await.unwrap();
    assert_eq!(record.tithi, TithiName::Ashtami);
    assert_eq!(source.fetch_count(), before + 2);
}

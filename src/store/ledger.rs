//! Durable calendar ledger backed by SQLite.
//!
//! One row per canonical instant key, upsert semantics. Vector fields are
//! stored as JSON triples and the observance list as a JSON array; a row
//! whose `upavaas` column is NULL (or the literal string "null") predates
//! observance resolution and is reported as absent so the caller
//! recomputes instead of serving an incomplete record.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{PanchangaError, Result};
use crate::panchanga::types::{Ayana, Grahana, Masa, Paksha, Phase, Rashi, Ritu, TithiName};
use crate::record::{CalendarRecord, UpavaasInfo};

/// Keyed durable storage for calendar records.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get_by_key(&self, key: &str) -> Result<Option<CalendarRecord>>;
    async fn upsert(&self, record: &CalendarRecord) -> Result<()>;
}

/// SQLite implementation. A connection is opened per operation inside
/// `spawn_blocking`; SQLite serializes writers itself.
pub struct SqliteLedger {
    db_path: PathBuf,
}

impl SqliteLedger {
    /// Open (or create) the database and ensure the schema exists.
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let path_clone = path.clone();

        task::spawn_blocking(move || {
            let conn = Connection::open(&path_clone)?;
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS lunar_ephemeris (
                    key TEXT PRIMARY KEY,
                    ayana TEXT NOT NULL,
                    ritu TEXT NOT NULL,
                    masa TEXT NOT NULL,
                    paksha TEXT NOT NULL,
                    tithi TEXT NOT NULL,
                    phase TEXT NOT NULL,
                    surya_rashi TEXT NOT NULL,
                    chandra_rashi TEXT NOT NULL,
                    surya_longitude_deg REAL NOT NULL,
                    chandra_longitude_deg REAL NOT NULL,
                    longitudinal_angle_deg REAL NOT NULL,
                    grahana TEXT NOT NULL,
                    surya_xyz TEXT NOT NULL,
                    chandra_xyz TEXT NOT NULL,
                    upavaas TEXT,
                    created_at TEXT NOT NULL
                );
                "#,
                [],
            )?;
            Ok::<_, PanchangaError>(())
        })
        .await??;

        Ok(Self { db_path: path })
    }
}

struct RawRow {
    key: String,
    ayana: String,
    ritu: String,
    masa: String,
    paksha: String,
    tithi: String,
    phase: String,
    surya_rashi: String,
    chandra_rashi: String,
    surya_longitude_deg: f64,
    chandra_longitude_deg: f64,
    longitudinal_angle_deg: f64,
    grahana: String,
    surya_xyz: String,
    chandra_xyz: String,
    upavaas: Option<String>,
}

fn category<T>(parsed: Option<T>, column: &str, value: &str) -> Result<T> {
    parsed.ok_or_else(|| PanchangaError::Storage(format!("unknown {column} value {value:?}")))
}

fn decode_row(raw: RawRow) -> Result<Option<CalendarRecord>> {
    let upavaas_json = match raw.upavaas {
        None => return Ok(None),
        Some(s) if s == "null" => return Ok(None),
        Some(s) => s,
    };
    let upavaas: Vec<UpavaasInfo> = serde_json::from_str(&upavaas_json)?;

    Ok(Some(CalendarRecord {
        ayana: category(Ayana::from_name(&raw.ayana), "ayana", &raw.ayana)?,
        ritu: category(Ritu::from_name(&raw.ritu), "ritu", &raw.ritu)?,
        masa: category(Masa::from_name(&raw.masa), "masa", &raw.masa)?,
        paksha: category(Paksha::from_name(&raw.paksha), "paksha", &raw.paksha)?,
        tithi: category(TithiName::from_name(&raw.tithi), "tithi", &raw.tithi)?,
        phase: category(Phase::from_name(&raw.phase), "phase", &raw.phase)?,
        surya_rashi: category(Rashi::from_name(&raw.surya_rashi), "surya_rashi", &raw.surya_rashi)?,
        chandra_rashi: category(
            Rashi::from_name(&raw.chandra_rashi),
            "chandra_rashi",
            &raw.chandra_rashi,
        )?,
        surya_longitude_deg: raw.surya_longitude_deg,
        chandra_longitude_deg: raw.chandra_longitude_deg,
        longitudinal_angle_deg: raw.longitudinal_angle_deg,
        grahana: category(Grahana::from_name(&raw.grahana), "grahana", &raw.grahana)?,
        surya_xyz: serde_json::from_str(&raw.surya_xyz)?,
        chandra_xyz: serde_json::from_str(&raw.chandra_xyz)?,
        upavaas,
        key: raw.key,
    }))
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get_by_key(&self, key: &str) -> Result<Option<CalendarRecord>> {
        let path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            let row = conn
                .query_row(
                    "SELECT key, ayana, ritu, masa, paksha, tithi, phase,
                            surya_rashi, chandra_rashi,
                            surya_longitude_deg, chandra_longitude_deg,
                            longitudinal_angle_deg,
                            grahana, surya_xyz, chandra_xyz, upavaas
                     FROM lunar_ephemeris
                     WHERE key = ?1 AND upavaas IS NOT NULL",
                    params![&key],
                    |row| {
                        Ok(RawRow {
                            key: row.get(0)?,
                            ayana: row.get(1)?,
                            ritu: row.get(2)?,
                            masa: row.get(3)?,
                            paksha: row.get(4)?,
                            tithi: row.get(5)?,
                            phase: row.get(6)?,
                            surya_rashi: row.get(7)?,
                            chandra_rashi: row.get(8)?,
                            surya_longitude_deg: row.get(9)?,
                            chandra_longitude_deg: row.get(10)?,
                            longitudinal_angle_deg: row.get(11)?,
                            grahana: row.get(12)?,
                            surya_xyz: row.get(13)?,
                            chandra_xyz: row.get(14)?,
                            upavaas: row.get(15)?,
                        })
                    },
                )
                .optional()?;

            match row {
                None => Ok(None),
                Some(raw) => decode_row(raw),
            }
        })
        .await?
    }

    async fn upsert(&self, record: &CalendarRecord) -> Result<()> {
        let path = self.db_path.clone();
        let record = record.clone();

        task::spawn_blocking(move || {
            let surya_xyz = serde_json::to_string(&record.surya_xyz)?;
            let chandra_xyz = serde_json::to_string(&record.chandra_xyz)?;
            let upavaas = serde_json::to_string(&record.upavaas)?;
            let now = Utc::now().to_rfc3339();

            let conn = Connection::open(&path)?;
            conn.execute(
                "INSERT INTO lunar_ephemeris (
                    key, ayana, ritu, masa, paksha, tithi, phase,
                    surya_rashi, chandra_rashi,
                    surya_longitude_deg, chandra_longitude_deg,
                    longitudinal_angle_deg,
                    grahana, surya_xyz, chandra_xyz, upavaas, created_at
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                         ?13, ?14, ?15, ?16, ?17)
                 ON CONFLICT(key) DO UPDATE SET
                    ayana = excluded.ayana,
                    ritu = excluded.ritu,
                    masa = excluded.masa,
                    paksha = excluded.paksha,
                    tithi = excluded.tithi,
                    phase = excluded.phase,
                    surya_rashi = excluded.surya_rashi,
                    chandra_rashi = excluded.chandra_rashi,
                    surya_longitude_deg = excluded.surya_longitude_deg,
                    chandra_longitude_deg = excluded.chandra_longitude_deg,
                    longitudinal_angle_deg = excluded.longitudinal_angle_deg,
                    grahana = excluded.grahana,
                    surya_xyz = excluded.surya_xyz,
                    chandra_xyz = excluded.chandra_xyz,
                    upavaas = excluded.upavaas",
                params![
                    &record.key,
                    record.ayana.name(),
                    record.ritu.name(),
                    record.masa.name(),
                    record.paksha.name(),
                    record.tithi.name(),
                    record.phase.name(),
                    record.surya_rashi.name(),
                    record.chandra_rashi.name(),
                    record.surya_longitude_deg,
                    record.chandra_longitude_deg,
                    record.longitudinal_angle_deg,
                    record.grahana.name(),
                    &surya_xyz,
                    &chandra_xyz,
                    &upavaas,
                    &now,
                ],
            )?;
            Ok::<_, PanchangaError>(())
        })
        .await?
    }
}

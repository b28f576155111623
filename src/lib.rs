//! Lunar panchanga service
//!
//! Derives Hindu luni-solar calendar attributes (tithi, masa, paksha,
//! rashi, ayana, ritu, eclipse flag, observance days) for a UTC instant
//! from Sun/Moon state vectors served by the JPL Horizons API, with a
//! memory-cache -> SQLite-ledger -> compute lookup pipeline behind a small
//! HTTP surface.

pub mod config;
pub mod ephemeris;
pub mod error;
pub mod instant;
pub mod panchanga;
pub mod record;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use ephemeris::{HorizonsClient, Vector3, VectorSource};
pub use error::PanchangaError;
pub use instant::QueryInstant;
pub use panchanga::PanchangaEngine;
pub use record::{CalendarRecord, PlanetsSnapshot, UpavaasInfo};
pub use store::{CalendarService, Ledger, SqliteLedger};

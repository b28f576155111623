//! Horizons vector-ephemeris client.
//!
//! One request per (body, instant): a VECTORS query over a one-minute
//! window, ecliptic/J2000, kilometers. The JSON envelope's `result` field
//! carries a plain-text report; the state vector is the first `X= Y= Z=`
//! triplet between the `$$SOE` and `$$EOE` markers.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{PanchangaError, Result};
use crate::instant::QueryInstant;

use super::{Body, Center, Vector3};

/// Public Horizons endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Default bound on a single Horizons round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce a state vector for a body at an instant.
///
/// The engine and the planet snapshot depend on this seam, never on the
/// concrete client; tests substitute deterministic stubs.
#[async_trait]
pub trait VectorSource: Send + Sync {
    async fn fetch(&self, body: Body, center: Center, instant: &QueryInstant) -> Result<Vector3>;
}

#[derive(Deserialize)]
struct HorizonsEnvelope {
    #[serde(default)]
    result: String,
}

/// HTTP client for the Horizons API.
pub struct HorizonsClient {
    client: Client,
    base_url: String,
}

impl HorizonsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            base_url: base_url.into(),
        }
    }
}

impl Default for HorizonsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl VectorSource for HorizonsClient {
    async fn fetch(&self, body: Body, center: Center, instant: &QueryInstant) -> Result<Vector3> {
        let (start, stop) = instant.horizons_window();
        debug!(body = body.name(), center = center.code(), %start, "fetching state vector");

        let command = format!("'{}'", body.command());
        let center_code = format!("'{}'", center.code());
        let start_time = format!("'{start}'");
        let stop_time = format!("'{stop}'");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "json"),
                ("COMMAND", command.as_str()),
                ("CENTER", center_code.as_str()),
                ("EPHEM_TYPE", "'VECTORS'"),
                ("START_TIME", start_time.as_str()),
                ("STOP_TIME", stop_time.as_str()),
                ("STEP_SIZE", "'1 m'"),
                ("REF_PLANE", "'ECLIPTIC'"),
                ("REF_SYSTEM", "'J2000'"),
                ("OUT_UNITS", "'KM'"),
            ])
            .send()
            .await
            .map_err(|e| PanchangaError::ServiceUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PanchangaError::ServiceUnavailable(e.to_string()))?;

        let envelope: HorizonsEnvelope = response
            .json()
            .await
            .map_err(|_| PanchangaError::InvalidResponse)?;

        parse_vector_block(&envelope.result)
    }
}

/// Extract the first state-vector triplet from a Horizons text report.
///
/// The report must contain a `$$SOE`..`$$EOE` block; within it, the first
/// line matching the `X = .. Y = .. Z = ..` pattern wins.
pub fn parse_vector_block(result: &str) -> Result<Vector3> {
    let soe = result.find("$$SOE").ok_or(PanchangaError::InvalidResponse)?;
    let rest = &result[soe + "$$SOE".len()..];
    let eoe = rest.find("$$EOE").ok_or(PanchangaError::InvalidResponse)?;
    let block = &rest[..eoe];

    let triplet = Regex::new(
        r"X\s*=\s*([-0-9.E+]+)\s*Y\s*=\s*([-0-9.E+]+)\s*Z\s*=\s*([-0-9.E+]+)",
    )
    .map_err(|_| PanchangaError::ParseError)?;

    for line in block.lines() {
        if let Some(caps) = triplet.captures(line) {
            let x = caps[1].parse::<f64>().map_err(|_| PanchangaError::ParseError)?;
            let y = caps[2].parse::<f64>().map_err(|_| PanchangaError::ParseError)?;
            let z = caps[3].parse::<f64>().map_err(|_| PanchangaError::ParseError)?;
            return Ok(Vector3::new(x, y, z));
        }
    }

    Err(PanchangaError::ParseError)
}

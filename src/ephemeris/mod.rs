//! Ephemeris acquisition: bodies, state vectors, and the Horizons client.

mod body;
mod horizons;
mod vector;

pub use body::{Body, Center, SNAPSHOT_BODIES};
pub use horizons::{parse_vector_block, HorizonsClient, VectorSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use vector::Vector3;

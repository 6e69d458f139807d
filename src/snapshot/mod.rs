//! Snapshot records delivered by the external producers.
//!
//! A snapshot is a fully replacing value: the renderer holds exactly one and
//! swaps it wholesale when the next one arrives. All records deserialize
//! leniently, field by field. Missing fields, explicit `null`s and values of
//! the wrong type fall back to empty/zero so one bad field never discards
//! the rest of the snapshot.

pub mod game;
pub mod devices;
pub mod system;

pub use game::{Alien, BarrierBlock, Body, GameSnapshot};
pub use devices::{Device, DeviceSnapshot, DeviceStats, DeviceStatus};
pub use system::SystemSnapshot;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field as `T::default()` when it is `null` or does not
/// match `T`.
///
/// Only malformed input on the outer deserializer is still an error.
pub(crate) fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a> + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

pub(crate) fn default_true() -> bool {
    true
}

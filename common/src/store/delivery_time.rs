//! Per-order delivery estimates.
//!
//! The tracking card asks a routing service how long the drive takes and
//! keeps the answer so reloading the page does not repeat the lookup.
//! Entries are written as `{"time": minutes, "timestamp": ms}` under
//! `deliveryTime_<orderId>`; builds before the timestamp was added wrote a
//! bare number, which is still read back.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::KeyValueStore;
use crate::config::DELIVERY_TIME_KEY_PREFIX;
use crate::error::StoreError;

/// Added to the drive time for preparation when showing an estimate.
pub const PREPARATION_MINUTES: u32 = 15;

/// Entries older than this are purged.
pub const DELIVERY_TIME_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct DeliveryTimeEntry {
    time: u32,
    timestamp: i64,
}

fn key_for(order_id: &str) -> String {
    format!("{DELIVERY_TIME_KEY_PREFIX}{order_id}")
}

/// Cached estimate in minutes, if any.
pub fn get<S: KeyValueStore + ?Sized>(
    store: &S,
    order_id: &str,
) -> Result<Option<u32>, StoreError> {
    let Some(raw) = store.get(&key_for(order_id))? else {
        return Ok(None);
    };
    let minutes = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map
            .get("time")
            .and_then(Value::as_u64)
            .and_then(|t| u32::try_from(t).ok()),
        Ok(Value::Number(n)) => n.as_u64().and_then(|t| u32::try_from(t).ok()),
        _ => raw.trim().parse::<u32>().ok(),
    };
    Ok(minutes)
}

pub fn put<S: KeyValueStore + ?Sized>(
    store: &mut S,
    order_id: &str,
    minutes: u32,
    now_ms: i64,
) -> Result<(), StoreError> {
    let key = key_for(order_id);
    let entry = DeliveryTimeEntry {
        time: minutes,
        timestamp: now_ms,
    };
    let raw = serde_json::to_string(&entry).map_err(|source| StoreError::Serialization {
        key: key.clone(),
        source,
    })?;
    store.set(&key, &raw)
}

/// Minutes of driving from a 2x2 duration matrix (seconds), taking the
/// slower of the two directions and rounding up.
pub fn minutes_from_matrix(durations: &[Vec<Option<f64>>]) -> Option<u32> {
    let there = durations.first()?.get(1).copied().flatten()?;
    let back = durations.get(1)?.first().copied().flatten()?;
    let seconds = there.max(back);
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some((seconds / 60.0).ceil() as u32)
}

/// Removes entries older than [`DELIVERY_TIME_TTL_MS`] and entries that are
/// not JSON at all. Returns how many were removed.
pub fn purge_expired<S: KeyValueStore + ?Sized>(
    store: &mut S,
    now_ms: i64,
) -> Result<usize, StoreError> {
    let mut removed = 0;
    for key in store.keys()? {
        if !key.starts_with(DELIVERY_TIME_KEY_PREFIX) {
            continue;
        }
        let Some(raw) = store.get(&key)? else {
            continue;
        };
        let expired = match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value
                .get("timestamp")
                .and_then(Value::as_i64)
                .is_some_and(|ts| now_ms - ts > DELIVERY_TIME_TTL_MS),
            Err(err) => {
                warn!("unreadable delivery estimate {key}: {err}");
                true
            }
        };
        if expired {
            debug!("purging delivery estimate {key}");
            store.remove(&key)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const NOW: i64 = 1_760_000_000_000;

    #[test]
    fn put_then_get() {
        let mut store = MemoryStore::default();
        put(&mut store, "o1", 18, NOW).unwrap();
        assert_eq!(get(&store, "o1").unwrap(), Some(18));
        assert_eq!(get(&store, "o2").unwrap(), None);
    }

    #[test]
    fn legacy_plain_number_is_read() {
        let mut store = MemoryStore::default();
        store.set("deliveryTime_o1", "25").unwrap();
        assert_eq!(get(&store, "o1").unwrap(), Some(25));
    }

    #[test]
    fn matrix_takes_slower_direction() {
        let matrix = vec![vec![Some(0.0), Some(610.0)], vec![Some(540.0), Some(0.0)]];
        assert_eq!(minutes_from_matrix(&matrix), Some(11));
        assert_eq!(minutes_from_matrix(&[vec![Some(0.0)]]), None);
        assert_eq!(minutes_from_matrix(&[vec![Some(0.0), None], vec![Some(1.0), Some(0.0)]]), None);
    }

    #[test]
    fn purge_removes_stale_and_garbage_only() {
        let mut store = MemoryStore::default();
        put(&mut store, "fresh", 10, NOW - 1_000).unwrap();
        put(&mut store, "stale", 10, NOW - DELIVERY_TIME_TTL_MS - 1).unwrap();
        store.set("deliveryTime_broken", "ten minutes").unwrap();
        store.set("deliveryTime_legacy", "12").unwrap();
        store.set("cart-storage", "{}").unwrap();

        assert_eq!(purge_expired(&mut store, NOW).unwrap(), 2);
        let keys = store.keys().unwrap();
        assert!(keys.contains(&"deliveryTime_fresh".to_string()));
        assert!(keys.contains(&"deliveryTime_legacy".to_string()));
        assert!(keys.contains(&"cart-storage".to_string()));
        assert_eq!(keys.len(), 3);
    }
}

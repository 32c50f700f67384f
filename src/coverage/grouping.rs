use std::collections::{BTreeMap, BTreeSet};

use crate::reading::{Gateway, Reading};

/// Grow-only multimap: each key holds its values in insertion order.
pub type Grouped<K, T> = BTreeMap<K, Vec<T>>;

/// Readings keyed by every gateway that heard them. Each copy only keeps
/// that gateway's receptions, so a reading heard by N distinct gateways
/// lands in N groups, once each.
pub fn group_by_gateway(readings: &[Reading]) -> Grouped<String, Reading> {
    let mut grouped = Grouped::new();
    for reading in readings {
        let heard_by: BTreeSet<&str> = reading
            .gateway_receptions
            .iter()
            .map(|r| r.gateway_id.as_str())
            .collect();
        for gateway_id in heard_by {
            grouped
                .entry(gateway_id.to_string())
                .or_insert_with(Vec::new)
                .push(reading.for_gateway(gateway_id));
        }
    }
    grouped
}

/// Readings keyed by radio configuration, receptions untouched.
pub fn group_by_config(readings: &[Reading]) -> Grouped<String, Reading> {
    let mut grouped = Grouped::new();
    for reading in readings {
        grouped
            .entry(reading.radio_config.clone())
            .or_insert_with(Vec::new)
            .push(reading.clone());
    }
    grouped
}

/// Gateways with a known location, first reported position wins.
pub fn gateways(readings: &[Reading]) -> BTreeMap<String, Gateway> {
    let mut gateways = BTreeMap::new();
    for reception in readings.iter().flat_map(|r| &r.gateway_receptions) {
        if gateways.contains_key(&reception.gateway_id) {
            continue;
        }
        if let Some((latitude, longitude)) = reception.location() {
            gateways.insert(
                reception.gateway_id.clone(),
                Gateway {
                    id: reception.gateway_id.clone(),
                    latitude,
                    longitude,
                },
            );
        }
    }
    gateways
}

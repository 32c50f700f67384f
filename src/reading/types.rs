use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

/// One gateway's observation of an uplink.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReception {
    pub gateway_id: String,
    pub rssi: i32,
    pub snr: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GatewayReception {
    /// The gateway's reported position, if it reported a usable one.
    ///
    /// Uplink metadata uses `0,0` for "unknown", so that pair counts as absent.
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if !(lat == 0.0 && lon == 0.0) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A single telemetry event from a device.
///
/// Two readings are the same reading when they share device id and sequence,
/// whatever their payload says.
#[derive(Debug, Clone)]
pub struct Reading {
    pub device_id: String,
    pub sequence: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub radio_config: String,
    pub coding_rate: String,
    pub temperature: i32,
    pub humidity: i32,
    pub received_at: Option<DateTime<Utc>>,
    /// In reception order; the first entry is the primary reception.
    pub gateway_receptions: Vec<GatewayReception>,
}

impl Reading {
    pub fn primary_reception(&self) -> Option<&GatewayReception> {
        self.gateway_receptions.first()
    }

    /// A new reading with the same scalar fields, keeping only receptions
    /// from `gateway_id` (in their original order).
    pub fn for_gateway(&self, gateway_id: &str) -> Reading {
        Reading {
            device_id: self.device_id.clone(),
            sequence: self.sequence,
            latitude: self.latitude,
            longitude: self.longitude,
            radio_config: self.radio_config.clone(),
            coding_rate: self.coding_rate.clone(),
            temperature: self.temperature,
            humidity: self.humidity,
            received_at: self.received_at,
            gateway_receptions: self
                .gateway_receptions
                .iter()
                .filter(|r| r.gateway_id == gateway_id)
                .cloned()
                .collect(),
        }
    }
}

impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        self.device_id == other.device_id && self.sequence == other.sequence
    }
}

impl Eq for Reading {}

impl Hash for Reading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.device_id.hash(state);
        self.sequence.hash(state);
    }
}

/// A fixed receiver and where it first said it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Gateway {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn equality_uses_device_and_sequence_only() {
        let a = reading(1, 45.0, 4.0);
        let mut b = reading(1, 46.0, 5.0);
        b.temperature = 99;
        assert_eq!(a, b);

        let mut c = reading(1, 45.0, 4.0);
        c.device_id = "node-2".to_string();
        assert_ne!(a, c);
        assert_ne!(a, reading(2, 45.0, 4.0));
    }

    #[test]
    fn for_gateway_filters_without_touching_original() {
        let mut r = reading(1, 45.0, 4.0);
        r.gateway_receptions = vec![
            reception("gw-a", -90, 1.0),
            reception("gw-b", -95, 2.0),
            reception("gw-a", -99, 3.0),
        ];

        let only_a = r.for_gateway("gw-a");
        assert_eq!(only_a.gateway_receptions.len(), 2);
        assert_eq!(only_a.gateway_receptions[0].rssi, -90);
        assert_eq!(only_a.gateway_receptions[1].rssi, -99);
        assert_eq!(only_a.latitude, r.latitude);
        assert_eq!(r.gateway_receptions.len(), 3);
    }

    #[test]
    fn zero_zero_location_is_absent() {
        assert_eq!(located("gw", -90, 0.0, 0.0).location(), None);
        assert_eq!(reception("gw", -90, 0.0).location(), None);
        assert_eq!(
            located("gw", -90, 45.7, 4.8).location(),
            Some((45.7, 4.8))
        );
    }
}

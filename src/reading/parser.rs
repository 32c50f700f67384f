use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::reading::error::ReadingError;
use crate::reading::types::{GatewayReception, Reading};

#[derive(Debug, Deserialize)]
struct Uplink {
    dev_id: String,
    counter: u64,
    payload_fields: PayloadFields,
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
struct PayloadFields {
    latitude: f64,
    longitude: f64,
    temperature: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    time: Option<DateTime<Utc>>,
    data_rate: String,
    coding_rate: String,
    gateways: Vec<UplinkGateway>,
}

#[derive(Debug, Deserialize)]
struct UplinkGateway {
    gtw_id: String,
    rssi: i32,
    snr: f64,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

impl From<Uplink> for Reading {
    fn from(uplink: Uplink) -> Self {
        Reading {
            device_id: uplink.dev_id,
            sequence: uplink.counter,
            latitude: uplink.payload_fields.latitude,
            longitude: uplink.payload_fields.longitude,
            radio_config: uplink.metadata.data_rate,
            coding_rate: uplink.metadata.coding_rate,
            temperature: uplink.payload_fields.temperature,
            humidity: uplink.payload_fields.humidity,
            received_at: uplink.metadata.time,
            gateway_receptions: uplink
                .metadata
                .gateways
                .into_iter()
                .map(|g| GatewayReception {
                    gateway_id: g.gtw_id,
                    rssi: g.rssi,
                    snr: g.snr,
                    latitude: g.latitude,
                    longitude: g.longitude,
                })
                .collect(),
        }
    }
}

/// Parse one `<prefix> <json>` log line. `line_no` is only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<Reading, ReadingError> {
    let payload = line
        .trim()
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
        .ok_or(ReadingError::MissingPayload { line: line_no })?;

    let uplink: Uplink = serde_json::from_str(payload).map_err(|source| ReadingError::Json {
        line: line_no,
        source,
    })?;
    if uplink.metadata.gateways.is_empty() {
        return Err(ReadingError::NoGateways { line: line_no });
    }

    Ok(uplink.into())
}

/// Parse a whole log, keeping input order. Blank lines are skipped.
pub fn parse_log(content: &str) -> Result<Vec<Reading>, ReadingError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(l, i + 1))
        .collect()
}

pub fn load_log(path: &Path) -> Result<Vec<Reading>, ReadingError> {
    let content = fs::read_to_string(path)?;
    let readings = parse_log(&content)?;
    log::info!("Loaded {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

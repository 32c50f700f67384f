use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::reading::types::Reading;

/// Headline numbers about a parsed log.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub readings: usize,
    pub devices: usize,
    pub gateways: usize,
    pub radio_configs: BTreeSet<String>,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl Summary {
    pub fn of(readings: &[Reading]) -> Self {
        let devices: BTreeSet<&str> = readings.iter().map(|r| r.device_id.as_str()).collect();
        let gateways: BTreeSet<&str> = readings
            .iter()
            .flat_map(|r| r.gateway_receptions.iter())
            .map(|g| g.gateway_id.as_str())
            .collect();
        let radio_configs = readings.iter().map(|r| r.radio_config.clone()).collect();
        let times = readings.iter().filter_map(|r| r.received_at);

        Self {
            readings: readings.len(),
            devices: devices.len(),
            gateways: gateways.len(),
            radio_configs,
            first_seen: times.clone().min(),
            last_seen: times.max(),
        }
    }
}

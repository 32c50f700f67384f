use crate::coverage::error::CoverageError;
use crate::reading::Reading;

/// Summary of a group of readings taken at roughly one place.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedMeasure {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub humidity: f64,
    /// Mean RSSI of each reading's primary reception, rounded (dBm).
    pub signal_strength: i32,
    /// Mean SNR of each reading's primary reception (dB).
    pub signal_quality: f64,
    pub samples: usize,
}

impl AveragedMeasure {
    /// Position and environment use medians so a stray reading inside a
    /// cluster cannot drag them; signal figures are means.
    pub fn from_readings(readings: &[Reading]) -> Result<Self, CoverageError> {
        if readings.is_empty() {
            return Err(CoverageError::EmptyGroup);
        }

        let primaries = readings
            .iter()
            .map(Reading::primary_reception)
            .collect::<Option<Vec<_>>>()
            .ok_or(CoverageError::NoReception)?;
        let rssi = mean(primaries.iter().map(|p| p.rssi as f64));
        let snr = mean(primaries.iter().map(|p| p.snr));

        Ok(Self {
            latitude: median(readings.iter().map(|r| r.latitude)),
            longitude: median(readings.iter().map(|r| r.longitude)),
            temperature: median(readings.iter().map(|r| r.temperature as f64)),
            humidity: median(readings.iter().map(|r| r.humidity as f64)),
            signal_strength: rssi.round() as i32,
            signal_quality: snr,
            samples: readings.len(),
        })
    }
}

// Both helpers are only called on non-empty input.

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    sum / count as f64
}

fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

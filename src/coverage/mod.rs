mod error;
mod grouping;
mod measure;

use std::collections::BTreeMap;

use crate::cluster::ClusterAssignment;
use crate::reading::Reading;

pub use error::CoverageError;
pub use grouping::{gateways, group_by_config, group_by_gateway, Grouped};
pub use measure::AveragedMeasure;

/// Summaries per group key, one per cluster the key appears in.
pub type Coverage = BTreeMap<String, Vec<AveragedMeasure>>;

/// Split every non-noise cluster with `group_fn` and summarise each
/// non-empty sub-group. Noise readings never contribute.
pub fn aggregate<F>(clustered: &ClusterAssignment, group_fn: F) -> Result<Coverage, CoverageError>
where
    F: Fn(&[Reading]) -> Grouped<String, Reading>,
{
    let mut coverage = Coverage::new();
    for (label, readings) in clustered.clusters() {
        for (key, group) in group_fn(readings) {
            if group.is_empty() {
                continue;
            }
            let measure = AveragedMeasure::from_readings(&group)?;
            log::debug!(
                "cluster {} / {}: {} readings, {} dBm, {:.1} dB SNR, {} C, {} %RH",
                label,
                key,
                measure.samples,
                measure.signal_strength,
                measure.signal_quality,
                measure.temperature,
                measure.humidity
            );
            coverage.entry(key).or_default().push(measure);
        }
    }
    Ok(coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterLabel;
    use crate::reading::fixtures::{reading, reception};

    fn assignment(entries: Vec<(ClusterLabel, Reading)>) -> ClusterAssignment {
        entries.into_iter().collect()
    }

    #[test]
    fn noise_only_yields_nothing() {
        let clustered = assignment(vec![
            (ClusterLabel::Noise, reading(1, 45.0, 4.0)),
            (ClusterLabel::Noise, reading(2, 45.1, 4.1)),
        ]);
        assert!(aggregate(&clustered, group_by_gateway).unwrap().is_empty());
        assert!(aggregate(&clustered, group_by_config).unwrap().is_empty());
    }

    #[test]
    fn one_measure_per_cluster_per_gateway() {
        let mut shared = reading(1, 45.0, 4.0);
        shared.gateway_receptions = vec![reception("gw-a", -90, 1.0), reception("gw-b", -100, 2.0)];
        let mut only_a = reading(2, 45.0, 4.0);
        only_a.gateway_receptions = vec![reception("gw-a", -94, 3.0)];
        let mut far = reading(3, 46.0, 5.0);
        far.gateway_receptions = vec![reception("gw-a", -120, -5.0)];

        let clustered = assignment(vec![
            (ClusterLabel::Cluster(0), shared),
            (ClusterLabel::Cluster(0), only_a),
            (ClusterLabel::Cluster(1), far),
            (ClusterLabel::Noise, reading(4, 47.0, 6.0)),
        ]);
        let coverage = aggregate(&clustered, group_by_gateway).unwrap();

        let a = &coverage["gw-a"];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].signal_strength, -92);
        assert_eq!(a[1].signal_strength, -120);

        let b = &coverage["gw-b"];
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].signal_strength, -100);
        assert_eq!(b[0].signal_quality, 2.0);
    }

    #[test]
    fn groups_by_radio_config_within_clusters() {
        let mut sf12 = reading(2, 45.0, 4.0);
        sf12.radio_config = "SF12BW125".to_string();
        let clustered = assignment(vec![
            (ClusterLabel::Cluster(0), reading(1, 45.0, 4.0)),
            (ClusterLabel::Cluster(0), sf12),
            (ClusterLabel::Cluster(1), reading(3, 46.0, 5.0)),
        ]);
        let coverage = aggregate(&clustered, group_by_config).unwrap();
        assert_eq!(coverage["SF7BW125"].len(), 2);
        assert_eq!(coverage["SF12BW125"].len(), 1);
    }
}

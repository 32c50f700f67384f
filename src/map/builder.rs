use std::collections::BTreeMap;

use crate::cluster::ClusterAssignment;
use crate::coverage::{AveragedMeasure, Coverage};
use crate::map::feature::{FeatureCollection, MapPoint};
use crate::reading::Gateway;

fn gateway_point(gateway: &Gateway) -> MapPoint {
    MapPoint::Gateway {
        latitude: gateway.latitude,
        longitude: gateway.longitude,
        id: gateway.id.clone(),
    }
}

fn signal_point(measure: &AveragedMeasure) -> MapPoint {
    MapPoint::Signal {
        latitude: measure.latitude,
        longitude: measure.longitude,
        signal_strength: measure.signal_strength,
    }
}

/// One pin per gateway.
pub fn build_gateway_map(gateways: &BTreeMap<String, Gateway>) -> FeatureCollection {
    gateways.values().map(|g| gateway_point(g).to_feature()).collect()
}

/// Per gateway: its own pin first, then every coverage summary it received.
/// Coverage for gateways without a known location is dropped.
pub fn build_gateway_coverage_maps(
    gateways: &BTreeMap<String, Gateway>,
    coverage: &Coverage,
) -> BTreeMap<String, FeatureCollection> {
    let mut maps = BTreeMap::new();
    for (gateway_id, measures) in coverage {
        let Some(gateway) = gateways.get(gateway_id) else {
            log::debug!("No location for gateway {}, skipping its coverage", gateway_id);
            continue;
        };
        let features: FeatureCollection = std::iter::once(gateway_point(gateway))
            .chain(measures.iter().map(signal_point))
            .map(|p| p.to_feature())
            .collect();
        maps.insert(gateway_id.clone(), features);
    }
    maps
}

/// Per radio configuration: one pin per coverage summary.
pub fn build_config_coverage_maps(coverage: &Coverage) -> BTreeMap<String, FeatureCollection> {
    coverage
        .iter()
        .map(|(config, measures)| {
            let features: FeatureCollection =
                measures.iter().map(|m| signal_point(m).to_feature()).collect();
            (config.clone(), features)
        })
        .collect()
}

/// One pin per reading, colored by the cluster it belongs to.
pub fn build_cluster_map(clustered: &ClusterAssignment) -> FeatureCollection {
    clustered
        .iter()
        .flat_map(|(label, readings)| {
            readings.iter().map(move |r| MapPoint::Cluster {
                latitude: r.latitude,
                longitude: r.longitude,
                label,
            })
        })
        .map(|p| p.to_feature())
        .collect()
}

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::cluster::{self, ClusterError};
use crate::coverage::{self, CoverageError};
use crate::export::{ExportError, Layer, LayerWriter};
use crate::map::{self, FeatureCollection};
use crate::reading::Reading;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("clustering failed: {0}")]
    Cluster(#[from] ClusterError),
    #[error("aggregation failed: {0}")]
    Coverage(#[from] CoverageError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Every map produced by one run.
#[derive(Debug, Clone, Default)]
pub struct CoverageLayers {
    pub clusters: FeatureCollection,
    pub gateways: FeatureCollection,
    pub gateway_coverage: BTreeMap<String, FeatureCollection>,
    pub data_rate_coverage: BTreeMap<String, FeatureCollection>,
}

impl CoverageLayers {
    fn layers(&self) -> impl Iterator<Item = (Layer, &FeatureCollection)> {
        [(Layer::Clusters, &self.clusters), (Layer::Gateways, &self.gateways)]
            .into_iter()
            .chain(
                self.gateway_coverage
                    .iter()
                    .map(|(id, c)| (Layer::GatewayCoverage(id.clone()), c)),
            )
            .chain(
                self.data_rate_coverage
                    .iter()
                    .map(|(config, c)| (Layer::DataRateCoverage(config.clone()), c)),
            )
    }

    /// Write every layer. Fails before touching the disk if two keys map
    /// to the same file name.
    pub fn write(&self, writer: &LayerWriter) -> Result<Vec<PathBuf>, ExportError> {
        let mut claimed: BTreeMap<PathBuf, Layer> = BTreeMap::new();
        for (layer, _) in self.layers() {
            let path = writer.layer_path(&layer);
            if let Some(first) = claimed.get(&path) {
                return Err(ExportError::PathCollision {
                    path,
                    first: first.describe(),
                    second: layer.describe(),
                });
            }
            claimed.insert(path, layer);
        }

        self.layers()
            .map(|(layer, collection)| writer.write(&layer, collection))
            .collect()
    }
}

pub struct Pipeline {
    pub radius_m: f64,
    pub min_points: usize,
}

impl Pipeline {
    pub fn run(&self, readings: &[Reading]) -> Result<CoverageLayers, PipelineError> {
        let clustered = cluster::cluster(readings, self.radius_m, self.min_points)?;
        let gateways = coverage::gateways(readings);
        log::info!("{} gateways with a known location", gateways.len());

        let by_gateway = coverage::aggregate(&clustered, coverage::group_by_gateway)?;
        let by_config = coverage::aggregate(&clustered, coverage::group_by_config)?;

        Ok(CoverageLayers {
            clusters: map::build_cluster_map(&clustered),
            gateways: map::build_gateway_map(&gateways),
            gateway_coverage: map::build_gateway_coverage_maps(&gateways, &by_gateway),
            data_rate_coverage: map::build_config_coverage_maps(&by_config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::read_layer;
    use crate::reading::fixtures::{located, reading};

    fn survey() -> Vec<Reading> {
        let mut readings = Vec::new();
        for (i, (lat, lon)) in [(45.7837, 4.8724), (45.7838, 4.8724), (45.9, 5.0)]
            .into_iter()
            .enumerate()
        {
            let mut r = reading(i as u64, lat, lon);
            r.gateway_receptions = vec![
                located("gw-a", -107 - 6 * i as i32, 45.78, 4.87),
                located("gw-b", -90, 0.0, 0.0),
            ];
            readings.push(r);
        }
        readings
    }

    #[test]
    fn builds_every_layer() {
        let pipeline = Pipeline {
            radius_m: 15.0,
            min_points: 2,
        };
        let layers = pipeline.run(&survey()).unwrap();

        assert_eq!(layers.clusters.len(), 3);
        assert_eq!(layers.gateways.len(), 1);

        // gw-b has no usable location, so only gw-a gets a coverage map
        assert_eq!(layers.gateway_coverage.len(), 1);
        let gw_a = &layers.gateway_coverage["gw-a"];
        assert_eq!(gw_a.len(), 2);
        assert_eq!(gw_a.features[1].properties.title, "-110 dBm");
        assert_eq!(gw_a.features[1].properties.marker_color, "#FF0000");

        assert_eq!(layers.data_rate_coverage["SF7BW125"].len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let pipeline = Pipeline {
            radius_m: 15.0,
            min_points: 2,
        };
        assert!(matches!(
            pipeline.run(&[]),
            Err(PipelineError::Cluster(ClusterError::EmptyInput))
        ));
    }

    #[test]
    fn writes_all_layers() {
        let layers = Pipeline {
            radius_m: 15.0,
            min_points: 2,
        }
        .run(&survey())
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = LayerWriter::new(dir.path().to_path_buf());
        let written = layers.write(&writer).unwrap();

        assert_eq!(written.len(), 4);
        assert!(dir.path().join("gateways/gw-a.geojson").exists());
        assert!(dir.path().join("data_rates/SF7BW125.geojson").exists());
        let clusters = read_layer(&dir.path().join("clusters.geojson")).unwrap();
        assert_eq!(clusters, layers.clusters);
    }

    #[test]
    fn colliding_file_names_are_rejected() {
        let mut layers = CoverageLayers::default();
        layers
            .data_rate_coverage
            .insert("SF7/BW125".to_string(), FeatureCollection::default());
        layers
            .data_rate_coverage
            .insert("SF7_BW125".to_string(), FeatureCollection::default());

        let dir = tempfile::tempdir().unwrap();
        let writer = LayerWriter::new(dir.path().to_path_buf());
        match layers.write(&writer) {
            Err(ExportError::PathCollision { path, first, second }) => {
                assert_eq!(path, dir.path().join("data_rates/SF7_BW125.geojson"));
                assert_eq!(first, "data_rate_coverage SF7/BW125");
                assert_eq!(second, "data_rate_coverage SF7_BW125");
            }
            other => panic!("expected a path collision, got {:?}", other),
        }
        assert!(!dir.path().join("clusters.geojson").exists());
    }
}

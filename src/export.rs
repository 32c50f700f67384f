use std::{
    fs,
    path::{Path, PathBuf},
};

use strum_macros::Display;
use thiserror::Error;

use crate::map::FeatureCollection;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layers {first} and {second} would both be written to {}", .path.display())]
    PathCollision {
        path: PathBuf,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    Clusters,
    Gateways,
    GatewayCoverage(String),
    DataRateCoverage(String),
}

impl Layer {
    /// Gateway id or radio configuration of a per-key layer.
    pub fn key(&self) -> Option<&str> {
        match self {
            Layer::Clusters | Layer::Gateways => None,
            Layer::GatewayCoverage(key) | Layer::DataRateCoverage(key) => Some(key),
        }
    }

    /// Kind and key, e.g. `data_rate_coverage SF7BW125`.
    pub fn describe(&self) -> String {
        match self.key() {
            Some(key) => format!("{} {}", self, key),
            None => self.to_string(),
        }
    }
}

/// Writes layers under one output directory.
pub struct LayerWriter {
    base_dir: PathBuf,
}

impl LayerWriter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn layer_path(&self, layer: &Layer) -> PathBuf {
        match layer {
            Layer::Clusters => self.base_dir.join("clusters.geojson"),
            Layer::Gateways => self.base_dir.join("gateways.geojson"),
            Layer::GatewayCoverage(id) => self
                .base_dir
                .join("gateways")
                .join(format!("{}.geojson", file_safe(id))),
            Layer::DataRateCoverage(config) => self
                .base_dir
                .join("data_rates")
                .join(format!("{}.geojson", file_safe(config))),
        }
    }

    pub fn write(
        &self,
        layer: &Layer,
        collection: &FeatureCollection,
    ) -> Result<PathBuf, ExportError> {
        let path = self.layer_path(layer);
        if collection.is_empty() {
            log::warn!(
                "{} layer at {} has no features",
                layer.describe(),
                path.display()
            );
        }
        write_layer(&path, collection)?;
        log::info!(
            "Wrote {} layer ({} features) to {}",
            layer.describe(),
            collection.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Write a collection as pretty GeoJSON, creating parent directories.
pub fn write_layer(path: &Path, collection: &FeatureCollection) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(collection)?)?;
    Ok(())
}

#[cfg(test)]
pub fn read_layer(path: &Path) -> Result<FeatureCollection, ExportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn file_safe(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

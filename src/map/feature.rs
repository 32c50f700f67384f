//! Point features and the GeoJSON shapes they serialize to.

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterLabel;
use crate::map::color::{cluster_color, signal_color, GATEWAY_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "marker-color")]
    pub marker_color: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

/// Something drawn as a pin. Each kind decides its own color and label.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPoint {
    Signal {
        latitude: f64,
        longitude: f64,
        signal_strength: i32,
    },
    Gateway {
        latitude: f64,
        longitude: f64,
        id: String,
    },
    Cluster {
        latitude: f64,
        longitude: f64,
        label: ClusterLabel,
    },
}

impl MapPoint {
    pub fn position(&self) -> (f64, f64) {
        match self {
            MapPoint::Signal {
                latitude,
                longitude,
                ..
            }
            | MapPoint::Gateway {
                latitude,
                longitude,
                ..
            }
            | MapPoint::Cluster {
                latitude,
                longitude,
                ..
            } => (*latitude, *longitude),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MapPoint::Signal {
                signal_strength, ..
            } => signal_color(*signal_strength),
            MapPoint::Gateway { .. } => GATEWAY_COLOR,
            MapPoint::Cluster { label, .. } => cluster_color(*label),
        }
    }

    pub fn label(&self) -> String {
        match self {
            MapPoint::Signal {
                signal_strength, ..
            } => format!("{} dBm", signal_strength),
            MapPoint::Gateway { id, .. } => id.clone(),
            MapPoint::Cluster { label, .. } => label.to_string(),
        }
    }

    pub fn to_feature(&self) -> Feature {
        let (latitude, longitude) = self.position();
        Feature {
            geometry: Geometry::Point {
                coordinates: [longitude, latitude],
            },
            properties: Properties {
                marker_color: self.color().to_string(),
                title: self.label(),
            },
        }
    }
}

//! Density-based clustering (DBSCAN) over great-circle distance.
//!
//! Neighbourhoods are found through an R-tree of unit-sphere positions: the
//! chord between two points grows monotonically with their central angle, so
//! a Euclidean ball query gives every candidate, and the exact haversine test
//! decides membership.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use super::geo::{chord_length, haversine_angle, unit_vector};
use super::ClusterLabel;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// Slack on the chord prefilter so float error never drops a true neighbour.
const CHORD_SLACK: f64 = 1e-9;

pub struct Dbscan {
    /// Neighbourhood radius as a central angle (radians).
    pub eps_rad: f64,
    /// Neighbours needed, the point itself included, to be a core point.
    pub min_points: usize,
}

impl Dbscan {
    /// Label each `(latitude, longitude)` pair, given in degrees.
    pub fn fit(&self, coordinates: &[(f64, f64)]) -> Vec<ClusterLabel> {
        let radians: Vec<(f64, f64)> = coordinates
            .iter()
            .map(|(lat, lon)| (lat.to_radians(), lon.to_radians()))
            .collect();
        let neighbourhoods = self.neighbourhoods(&radians);

        let is_core: Vec<bool> = neighbourhoods
            .iter()
            .map(|n| n.len() >= self.min_points)
            .collect();
        log::debug!(
            "{} of {} points are core points",
            is_core.iter().filter(|c| **c).count(),
            coordinates.len()
        );

        let mut labels = vec![ClusterLabel::Noise; coordinates.len()];
        let mut next_cluster = 0;
        let mut stack = Vec::new();

        for start in 0..coordinates.len() {
            if labels[start] != ClusterLabel::Noise || !is_core[start] {
                continue;
            }

            // Depth-first expansion; border points keep the first cluster
            // that reaches them.
            let cluster = ClusterLabel::Cluster(next_cluster);
            let mut i = start;
            loop {
                if labels[i] == ClusterLabel::Noise {
                    labels[i] = cluster;
                    if is_core[i] {
                        stack.extend(
                            neighbourhoods[i]
                                .iter()
                                .copied()
                                .filter(|&n| labels[n] == ClusterLabel::Noise),
                        );
                    }
                }
                match stack.pop() {
                    Some(next) => i = next,
                    None => break,
                }
            }
            next_cluster += 1;
        }

        labels
    }

    /// Indices of all points within `eps_rad` of each point, itself included,
    /// in ascending order.
    fn neighbourhoods(&self, radians: &[(f64, f64)]) -> Vec<Vec<usize>> {
        let tree = RTree::bulk_load(
            radians
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon))| IndexedPoint::new(unit_vector(lat, lon), i))
                .collect(),
        );
        let max_chord = chord_length(self.eps_rad) + CHORD_SLACK;
        let max_chord_sq = max_chord * max_chord;

        radians
            .iter()
            .map(|&(lat, lon)| {
                let mut found: Vec<usize> = tree
                    .locate_within_distance(unit_vector(lat, lon), max_chord_sq)
                    .map(|p| p.data)
                    .filter(|&j| {
                        let (lat2, lon2) = radians[j];
                        haversine_angle(lat, lon, lat2, lon2) <= self.eps_rad
                    })
                    .collect();
                found.sort_unstable();
                found
            })
            .collect()
    }
}

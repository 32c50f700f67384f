mod dbscan;
mod error;
mod geo;

use std::collections::BTreeMap;
use std::fmt;

use crate::reading::Reading;

use dbscan::Dbscan;
use geo::meters_to_radians;

pub use error::ClusterError;

/// Cluster a reading was assigned to.
///
/// `Noise` orders before every cluster, so noise comes first when iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterLabel {
    Noise,
    Cluster(usize),
}

impl ClusterLabel {
    /// Numeric id with noise as `-1`.
    pub fn id(&self) -> i64 {
        match self {
            ClusterLabel::Noise => -1,
            ClusterLabel::Cluster(n) => *n as i64,
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self, ClusterLabel::Noise)
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Readings partitioned by cluster, noise included.
#[derive(Debug, Clone, Default)]
pub struct ClusterAssignment {
    groups: BTreeMap<ClusterLabel, Vec<Reading>>,
}

impl ClusterAssignment {
    /// Bucket `readings` by the label at the same index.
    pub fn from_labels(readings: &[Reading], labels: &[ClusterLabel]) -> Self {
        let mut groups: BTreeMap<ClusterLabel, Vec<Reading>> = BTreeMap::new();
        for (reading, label) in readings.iter().zip(labels) {
            groups.entry(*label).or_default().push(reading.clone());
        }
        Self { groups }
    }

    pub fn get(&self, label: ClusterLabel) -> Option<&[Reading]> {
        self.groups.get(&label).map(Vec::as_slice)
    }

    pub fn noise(&self) -> &[Reading] {
        self.get(ClusterLabel::Noise).unwrap_or_default()
    }

    /// Every bucket, noise first then clusters by ascending id.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterLabel, &[Reading])> {
        self.groups.iter().map(|(l, r)| (*l, r.as_slice()))
    }

    /// Buckets of real clusters only.
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterLabel, &[Reading])> {
        self.iter().filter(|(l, _)| !l.is_noise())
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters().count()
    }

    pub fn reading_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl FromIterator<(ClusterLabel, Reading)> for ClusterAssignment {
    fn from_iter<I: IntoIterator<Item = (ClusterLabel, Reading)>>(iter: I) -> Self {
        let mut groups: BTreeMap<ClusterLabel, Vec<Reading>> = BTreeMap::new();
        for (label, reading) in iter {
            groups.entry(label).or_default().push(reading);
        }
        Self { groups }
    }
}

/// Group readings that lie within `radius_m` of each other (great-circle)
/// into density clusters. A reading is a core point when at least
/// `min_points` readings, itself included, are within the radius.
pub fn cluster(
    readings: &[Reading],
    radius_m: f64,
    min_points: usize,
) -> Result<ClusterAssignment, ClusterError> {
    if readings.is_empty() {
        return Err(ClusterError::EmptyInput);
    }
    if !(radius_m.is_finite() && radius_m > 0.0) {
        return Err(ClusterError::InvalidRadius(radius_m));
    }
    if min_points == 0 {
        return Err(ClusterError::InvalidMinPoints(min_points));
    }

    let coordinates: Vec<(f64, f64)> = readings.iter().map(|r| (r.latitude, r.longitude)).collect();
    let labels = Dbscan {
        eps_rad: meters_to_radians(radius_m),
        min_points,
    }
    .fit(&coordinates);

    let assignment = ClusterAssignment::from_labels(readings, &labels);
    log::info!(
        "Clustered {} readings into {} clusters ({} noise) with radius {} m, min_points {}",
        assignment.reading_count(),
        assignment.cluster_count(),
        assignment.noise().len(),
        radius_m,
        min_points
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::reading::fixtures::reading;

    #[test]
    fn two_close_readings_cluster_and_far_one_is_noise() {
        let readings = vec![
            reading(1, 45.7837, 4.8724),
            reading(2, 45.7838, 4.8724),
            reading(3, 45.9000, 5.0000),
        ];
        let assignment = cluster(&readings, 15.0, 2).unwrap();

        let c0 = assignment.get(ClusterLabel::Cluster(0)).unwrap();
        assert_eq!(c0, &readings[..2]);
        assert_eq!(assignment.noise(), &readings[2..]);
        assert_eq!(assignment.cluster_count(), 1);
    }

    #[test]
    fn assignment_partitions_input() {
        let readings: Vec<Reading> = (0..40)
            .map(|i| {
                let offset = (i % 7) as f64 * 0.00004 + (i / 10) as f64 * 0.01;
                reading(i, 45.0 + offset, 4.0 + offset / 2.0)
            })
            .collect();
        let assignment = cluster(&readings, 10.0, 3).unwrap();

        assert_eq!(assignment.reading_count(), readings.len());
        let seen: HashSet<&Reading> = assignment.iter().flat_map(|(_, r)| r.iter()).collect();
        let expected: HashSet<&Reading> = readings.iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn isolated_reading_is_noise() {
        let readings = vec![
            reading(1, 45.0, 4.0),
            reading(2, 45.0, 4.0),
            reading(3, 45.1, 4.0),
        ];
        let assignment = cluster(&readings, 50.0, 2).unwrap();
        assert_eq!(assignment.noise(), &readings[2..]);
    }

    #[test]
    fn fewer_readings_than_min_points_is_all_noise() {
        let readings = vec![reading(1, 45.0, 4.0), reading(2, 45.0, 4.0)];
        let assignment = cluster(&readings, 50.0, 3).unwrap();
        assert_eq!(assignment.cluster_count(), 0);
        assert_eq!(assignment.noise().len(), 2);
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(cluster(&[], 15.0, 2), Err(ClusterError::EmptyInput)));
        let one = vec![reading(1, 45.0, 4.0)];
        assert!(matches!(cluster(&one, 0.0, 2), Err(ClusterError::InvalidRadius(_))));
        assert!(matches!(cluster(&one, f64::NAN, 2), Err(ClusterError::InvalidRadius(_))));
        assert!(matches!(cluster(&one, 15.0, 0), Err(ClusterError::InvalidMinPoints(0))));
    }

    #[test]
    fn labels_display_as_numeric_ids() {
        assert_eq!(ClusterLabel::Noise.to_string(), "-1");
        assert_eq!(ClusterLabel::Cluster(3).to_string(), "3");
        assert!(ClusterLabel::Noise < ClusterLabel::Cluster(0));
    }
}

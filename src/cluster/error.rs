use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cannot cluster an empty set of readings")]
    EmptyInput,
    #[error("clustering radius must be positive, got {0} m")]
    InvalidRadius(f64),
    #[error("min_points must be at least 1, got {0}")]
    InvalidMinPoints(usize),
}

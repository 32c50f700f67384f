use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("cannot summarise an empty group of readings")]
    EmptyGroup,
    #[error("a reading in the group carries no gateway reception")]
    NoReception,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("log file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid uplink JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: no JSON payload after prefix")]
    MissingPayload { line: usize },
    #[error("line {line}: uplink was received by no gateway")]
    NoGateways { line: usize },
}

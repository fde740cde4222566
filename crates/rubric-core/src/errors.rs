use thiserror::Error;

/// Error taxonomy for the harness.
///
/// `Config` is a programming error (bad metric construction, malformed batch
/// config) and fails fast. `Transport` covers unreachable or misbehaving
/// external services; it is recovered locally by the caller (empty output for
/// the system under test, score 0.0 for the judge) and never aborts a batch.
#[derive(Debug, Error)]
pub enum RubricError {
    #[error("config error: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
}

use thiserror::Error;

/// Errors surfaced while writing concordance output.
#[derive(Debug, Error)]
pub enum ConcordError {
    #[error("concordance output failed: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

/// Errors produced while resolving tag indices against a sentence tag table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("tag index {0} is not present in the sentence tag table")]
    UnknownTag(u32),
}

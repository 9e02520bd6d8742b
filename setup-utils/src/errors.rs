use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] ark_serialize::SerializationError),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),
    #[error("Invalid JSON structure, missing or ill-typed field: {0}")]
    InvalidJson(&'static str),
    #[error("Invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Element is not in the prime-order subgroup")]
    IncorrectSubgroup,
    #[error("The contribution secret must be non-zero")]
    DegenerateSecret,
    #[error("{0}")]
    VerificationFailed(#[from] VerificationError),
    #[error("Invalid contribution {index}: {source}")]
    InvalidContribution {
        index: usize,
        source: VerificationError,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid ratio: {0}")]
    InvalidRatio(&'static str),
    #[error("Transcript digest does not match the challenge")]
    DigestMismatch,
    #[error("Accumulators belong to different ceremonies (initial state hash differs)")]
    InitialHashMismatch,
    #[error("Updated delta does not match the value claimed by the public key")]
    DeltaMismatch,
    #[error("A group element failed its well-formedness check")]
    MalformedElement,
}

//! Errors

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Input data errors
    #[error("invalid input error {0}")]
    InvalidInputError(&'static str),

    #[error("invalid proof error {0}")]
    InvalidProofError(String),

    #[error("proof creation error {0}")]
    ProofCreationError(String),

    // Proof codec errors
    #[error("ed error: {0}")]
    EdError(ed::Error),
}

/// Merk result
pub type Result<T> = std::result::Result<T, Error>;

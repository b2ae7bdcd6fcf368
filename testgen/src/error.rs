//! Fixture generation errors

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Input data errors
    #[error("invalid input error {0}")]
    InvalidInputError(&'static str),

    // Store consistency errors
    #[error("value missing error {0}")]
    ValueMissing(String),

    #[error("unexpected value error {0}")]
    UnexpectedValue(String),

    #[error("unexpected proof shape error: proof attests {0} leaves")]
    UnexpectedProofShape(usize),

    #[error("unexpected leaf error {0}")]
    UnexpectedLeaf(String),

    // Merk errors
    #[error("merk error: {0}")]
    MerkError(testgen_merk::Error),
}

/// Fixture generation result
pub type Result<T> = std::result::Result<T, Error>;

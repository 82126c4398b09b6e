use commerce_codec::CodecError;
use thiserror::Error;

/// Payment-request URL errors.
#[derive(Debug, Error)]
pub enum PayError {
    #[error("invalid payment url: {0}")]
    InvalidUrl(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Address(#[from] CodecError),
}

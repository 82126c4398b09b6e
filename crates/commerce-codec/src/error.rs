use thiserror::Error;

/// Codec layer errors.
///
/// All variants are local and synchronous: a decode either fully succeeds
/// or fails with one of these, never with a partial value.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid length: need {expected} bytes, have {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown variant tag: {tag}")]
    UnknownVariant { tag: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_length() {
        let err = CodecError::InvalidLength {
            expected: 16,
            actual: 3,
        };
        assert_eq!(err.to_string(), "invalid length: need 16 bytes, have 3");
    }

    #[test]
    fn display_invalid_address() {
        let err = CodecError::InvalidAddress("base58 decode failed".into());
        assert_eq!(err.to_string(), "invalid address: base58 decode failed");
    }

    #[test]
    fn display_unknown_variant() {
        let err = CodecError::UnknownVariant { tag: 9 };
        assert_eq!(err.to_string(), "unknown variant tag: 9");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(CodecError::UnknownVariant { tag: 1 });
        assert!(err.to_string().contains("1"));
    }

    #[test]
    fn debug_format_works() {
        let err = CodecError::InvalidLength {
            expected: 8,
            actual: 0,
        };
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidLength"));
    }
}

use commerce_codec::CodecError;
use thiserror::Error;

/// Program client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("no valid bump: every candidate address for the seeds is on the curve")]
    NoValidBump,

    #[error("wrong account count: instruction takes {expected} accounts, got {actual}")]
    AccountCount { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_valid_bump() {
        let err = ClientError::NoValidBump;
        assert!(err.to_string().starts_with("no valid bump"));
    }

    #[test]
    fn display_account_count() {
        let err = ClientError::AccountCount {
            expected: 13,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "wrong account count: instruction takes 13 accounts, got 12"
        );
    }

    #[test]
    fn codec_errors_convert_and_display_transparently() {
        let err: ClientError = CodecError::UnknownVariant { tag: 7 }.into();
        assert_eq!(err.to_string(), "unknown variant tag: 7");
        assert!(matches!(err, ClientError::Codec(_)));
    }
}

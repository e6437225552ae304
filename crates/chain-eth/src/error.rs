use thiserror::Error;

/// Ethereum primitive errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("incomplete chain context: missing {0}")]
    IncompleteContext(&'static str),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_private_key() {
        let err = EthError::InvalidPrivateKey("scalar is zero".into());
        assert_eq!(err.to_string(), "invalid private key: scalar is zero");
    }

    #[test]
    fn display_invalid_address() {
        let err = EthError::InvalidAddress("bad checksum".into());
        assert_eq!(err.to_string(), "invalid address: bad checksum");
    }

    #[test]
    fn display_invalid_amount() {
        let err = EthError::InvalidAmount("exponent not allowed".into());
        assert_eq!(err.to_string(), "invalid amount: exponent not allowed");
    }

    #[test]
    fn display_incomplete_context() {
        let err = EthError::IncompleteContext("nonce");
        assert_eq!(err.to_string(), "incomplete chain context: missing nonce");
    }

    #[test]
    fn display_encoding_error() {
        let err = EthError::EncodingError("short return data".into());
        assert_eq!(err.to_string(), "encoding error: short return data");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(EthError::SigningError("test".into()));
        assert!(err.to_string().contains("test"));
    }
}

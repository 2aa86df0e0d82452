use openssl::error::ErrorStack;
use thiserror::Error;

pub(crate) type CryptoResult<T> = Result<T, Error>;

/// Error type for cryptographic operations
#[derive(Error, Debug)]
pub enum Error {
    /// The key does not fit any supported AES variant
    #[error("Invalid key length: {0} bytes")]
    InvalidKeyLength(usize),

    /// The secure random source could not produce an IV
    #[error("Secure random source unavailable: {0}")]
    Random(ErrorStack),

    /// Invalid data format or corrupted data
    #[error("Invalid data: {0}")]
    Invalid(String),

    /// Internal OpenSSL error
    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] ErrorStack),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

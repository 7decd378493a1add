use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("payload does not carry the seal_ prefix")]
    MissingPrefix,

    #[error("payload too short to contain an identifier and checksum ({0} chars)")]
    TruncatedPayload(usize),

    #[error("payload contains characters outside the encoding alphabet")]
    InvalidEncoding,

    #[error("payload checksum does not match its identifier")]
    ChecksumMismatch,
}

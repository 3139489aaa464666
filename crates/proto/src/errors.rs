use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    #[error("Malformed header: need 12 bytes, have {0}")]
    MalformedHeader(usize),

    #[error("Truncated message: {needed} bytes needed at offset {offset}, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Compressed name pointer at offset {0} (compression not supported)")]
    CompressedName(usize),

    #[error("Label '{0}' exceeds 63 bytes")]
    LabelTooLong(String),

    #[error("Invalid domain name: {0}")]
    InvalidName(String),
}

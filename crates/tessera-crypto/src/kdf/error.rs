use super::{BYTES_MAX, BYTES_MIN, CONTEXTBYTES};

/// Which side of a length range a value fell out of.
#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    #[strum(to_string = "too short")]
    TooShort,
    #[strum(to_string = "too long")]
    TooLong,
}

impl Bound {
    /// Checks `len` against `BYTES_MIN..=BYTES_MAX`.
    pub(crate) fn check(len: usize) -> Option<Self> {
        if len < BYTES_MIN {
            Some(Bound::TooShort)
        } else if len > BYTES_MAX {
            Some(Bound::TooLong)
        } else {
            None
        }
    }
}

/// Errors are never retryable, the caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("derived key {bound}: {len} bytes, expected {min}..={max}", min = BYTES_MIN, max = BYTES_MAX)]
    InvalidOutputLength { bound: Bound, len: usize },

    #[error("input key {bound}: {len} bytes, expected {min}..={max}", min = BYTES_MIN, max = BYTES_MAX)]
    InvalidInputKeyLength { bound: Bound, len: usize },

    #[error("context too long: {len} bytes, at most {max}", max = CONTEXTBYTES)]
    InvalidContextLength { len: usize },

    #[error("key derivation failed with code {code} (context: {context:?}, index: {index})")]
    Derivation {
        code: i32,
        context: String,
        index: u64,
    },

    #[error("failed to initialize libsodium")]
    Init,
}

use std::fmt::{Display, Formatter};

use super::{Error, CONTEXTBYTES};

/// Byte used to right-pad contexts shorter than `CONTEXTBYTES`. Not NUL.
pub const PADDING: u8 = b' ';

/// A validated context, always exactly `CONTEXTBYTES` long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context([u8; CONTEXTBYTES]);

impl Context {
    /// Validates the byte length of `context` and pads it with spaces.
    ///
    /// # Errors
    /// If `context` is longer than `CONTEXTBYTES` bytes.
    pub fn new(context: &str) -> Result<Self, Error> {
        let bytes = context.as_bytes();
        if bytes.len() > CONTEXTBYTES {
            return Err(Error::InvalidContextLength { len: bytes.len() });
        }

        let mut padded = [PADDING; CONTEXTBYTES];
        padded[..bytes.len()].copy_from_slice(bytes);

        Ok(Context(padded))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CONTEXTBYTES] {
        &self.0
    }
}

impl TryFrom<&str> for Context {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Built from a `&str` padded with ASCII, so always valid UTF-8.
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

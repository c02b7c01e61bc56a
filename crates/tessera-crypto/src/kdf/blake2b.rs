use tracing::{debug, warn};

use super::{error::Bound, Context, Error, Kdf, KEYBYTES};
use crate::sodium;

/// libsodium's BLAKE2b subkey derivation over a borrowed master key.
#[derive(Clone, Copy)]
pub struct Blake2bKdf<'a> {
    key: &'a [u8],
}

impl std::fmt::Debug for Blake2bKdf<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2bKdf")
            .field("key_len", &self.key.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Kdf for Blake2bKdf<'a> {
    const NAME: &'static str = "blake2b";

    type Error = Error;
    type Params = &'a [u8];

    /// Wraps `key` after checking its length against `BYTES_MIN..=BYTES_MAX`.
    fn new(key: Self::Params) -> Result<Self, Self::Error> {
        if let Some(bound) = Bound::check(key.len()) {
            return Err(Error::InvalidInputKeyLength {
                bound,
                len: key.len(),
            });
        }

        Ok(Blake2bKdf { key })
    }

    fn derive_key(
        &self,
        index: u64,
        context: &Context,
        out: &mut [u8],
    ) -> Result<(), Self::Error> {
        if let Some(bound) = Bound::check(out.len()) {
            return Err(Error::InvalidOutputLength {
                bound,
                len: out.len(),
            });
        }

        if !sodium::init() {
            return Err(Error::Init);
        }

        // `crypto_kdf_derive_from_key` reads exactly KEYBYTES of key material.
        let code = if self.key.len() == KEYBYTES {
            sodium::kdf_derive_from_key(out, index, context.as_bytes(), self.key)
        } else {
            sodium::blake2b_salt_personal(out, index, context.as_bytes(), self.key)
        };

        if code != 0 {
            warn!(code, %context, index, "libsodium derivation failed");
            return Err(Error::Derivation {
                code,
                context: context.to_string(),
                index,
            });
        }

        debug!(kdf = Self::NAME, %context, index, len = out.len(), "derived subkey");
        Ok(())
    }
}

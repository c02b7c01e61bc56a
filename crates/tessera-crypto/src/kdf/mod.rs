use secstr::SecStr;
use tracing::instrument;

use crate::eq::ConstantTimeEq;

pub mod blake2b;
pub mod context;
pub mod error;

pub use blake2b::Blake2bKdf;
pub use context::Context;
pub use error::{Bound, Error};

/// Smallest subkey, and smallest master key, accepted.
pub const BYTES_MIN: usize = libsodium_sys::crypto_kdf_BYTES_MIN as usize;
/// Largest subkey, and largest master key, accepted.
pub const BYTES_MAX: usize = libsodium_sys::crypto_kdf_BYTES_MAX as usize;
pub const CONTEXTBYTES: usize = libsodium_sys::crypto_kdf_CONTEXTBYTES as usize;
/// Master key length consumed natively by `crypto_kdf_derive_from_key`.
pub const KEYBYTES: usize = libsodium_sys::crypto_kdf_KEYBYTES as usize;

pub const DEFAULT_LENGTH: usize = 32;

pub trait Kdf: Sized {
    const NAME: &'static str;

    type Error: std::error::Error;
    type Params;

    /// # Errors
    /// If the parameters are out of the backend's bounds.
    fn new(params: Self::Params) -> Result<Self, Self::Error>;

    /// Derives the subkey at `index` for `context`, filling all of `out`.
    ///
    /// # Errors
    /// If the output length is out of bounds or the backend fails.
    fn derive_key(&self, index: u64, context: &Context, out: &mut [u8])
        -> Result<(), Self::Error>;
}

/// Derives a `length` byte subkey from `secret_key` at `index` within `context`.
///
/// Checks run in this order and the first violation is returned:
/// output length, secret key length, context length.
///
/// # Errors
/// See [`Error`]. Nothing is allocated unless all checks pass.
#[instrument(skip(secret_key), fields(key_len = secret_key.len()))]
pub fn derive(
    secret_key: &[u8],
    index: u64,
    length: usize,
    context: &str,
) -> Result<SecStr, Error> {
    if let Some(bound) = Bound::check(length) {
        return Err(Error::InvalidOutputLength { bound, len: length });
    }

    let kdf = Blake2bKdf::new(secret_key)?;
    let context = Context::new(context)?;

    let mut subkey = SecStr::new(vec![0u8; length]);
    kdf.derive_key(index, &context, subkey.unsecure_mut())?;

    Ok(subkey)
}

/// Derives the subkey at `index` with the length of `expected` and compares
/// the two in constant time.
///
/// # Errors
/// Same as [`derive`], with `expected.len()` as the output length.
#[instrument(skip(secret_key, expected), fields(key_len = secret_key.len(), len = expected.len()))]
pub fn verify(
    secret_key: &[u8],
    index: u64,
    context: &str,
    expected: &[u8],
) -> Result<bool, Error> {
    let subkey = derive(secret_key, index, expected.len(), context)?;
    Ok(ConstantTimeEq::eq(&subkey.unsecure(), &expected))
}

use std::{ffi::c_int, mem, ptr, sync::OnceLock};

use tracing::debug;

use crate::kdf::CONTEXTBYTES;

static INIT: OnceLock<bool> = OnceLock::new();

/// Initializes libsodium once per process.
/// Returns `false` if the library could not be initialized.
pub(crate) fn init() -> bool {
    *INIT.get_or_init(|| {
        // SAFETY: `sodium_init` is thread safe and may be called more than once.
        let code = unsafe { libsodium_sys::sodium_init() };
        debug!(code, "libsodium initialized");
        code >= 0
    })
}

/// Calls `crypto_kdf_derive_from_key`.
/// The caller guarantees `key` is exactly `crypto_kdf_KEYBYTES` long and
/// `out` is within the library's output bounds.
pub(crate) fn kdf_derive_from_key(
    out: &mut [u8],
    index: u64,
    context: &[u8; CONTEXTBYTES],
    key: &[u8],
) -> c_int {
    debug_assert_eq!(key.len(), libsodium_sys::crypto_kdf_KEYBYTES as usize);

    // SAFETY: every pointer is valid for the length libsodium reads from it.
    unsafe {
        libsodium_sys::crypto_kdf_derive_from_key(
            out.as_mut_ptr(),
            out.len(),
            index,
            context.as_ptr().cast(),
            key.as_ptr(),
        )
    }
}

/// Computes the BLAKE2b construction behind `crypto_kdf_derive_from_key` for
/// keys of any length accepted by `crypto_generichash_blake2b`.
pub(crate) fn blake2b_salt_personal(
    out: &mut [u8],
    index: u64,
    context: &[u8; CONTEXTBYTES],
    key: &[u8],
) -> c_int {
    let mut salt = [0u8; libsodium_sys::crypto_generichash_blake2b_SALTBYTES as usize];
    salt[..mem::size_of::<u64>()].copy_from_slice(&index.to_le_bytes());

    let mut personal = [0u8; libsodium_sys::crypto_generichash_blake2b_PERSONALBYTES as usize];
    personal[..context.len()].copy_from_slice(context);

    // SAFETY: salt and personal are sized by the library constants, the empty
    // message is never dereferenced and the key and output lengths are passed.
    unsafe {
        libsodium_sys::crypto_generichash_blake2b_salt_personal(
            out.as_mut_ptr(),
            out.len(),
            ptr::null(),
            0,
            key.as_ptr(),
            key.len(),
            salt.as_ptr(),
            personal.as_ptr(),
        )
    }
}

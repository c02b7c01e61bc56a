use secstr::SecStr;
use tessera_fs::fs::FileReadExt;
use tracing::debug;

use crate::{args::KeyArgs, config::KdfConfig, error::Error};

/// Resolves the master key: `--key-hex`, then `--key-file`, then `kdf.key`.
/// Length is left to the derivation.
///
/// # Errors
/// If no source is set, or the selected one cannot be read or decoded.
pub async fn load(args: &KeyArgs, config: &KdfConfig) -> Result<SecStr, Error> {
    if let Some(hex) = &args.key_hex {
        debug!(source = "argument", "loading master key");
        return const_hex::decode(hex.trim())
            .map(SecStr::new)
            .map_err(|_| Error::InvalidKeyHex);
    }

    let path = args
        .key_file
        .as_ref()
        .or(config.key.as_ref())
        .ok_or(Error::MissingKey)?;

    debug!(source = %path.display(), "loading master key");
    Ok(path.clone().read_hex_secret().await?)
}

use std::path::PathBuf;

use garde::Validate;
use serde::{Deserialize, Serialize};
use tessera_crypto::kdf::{BYTES_MAX, BYTES_MIN, CONTEXTBYTES, DEFAULT_LENGTH};
use tessera_fs::DefaultPathProvider;

use crate::encoding::Encoding;

#[derive(Validate, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[garde(dive)]
    pub kdf: KdfConfig,
    #[garde(dive)]
    pub telemetry: tessera_telemetry::config::Config,
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Defaults for flags omitted on the command line.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// Hex encoded master key file.
    #[garde(skip)]
    pub key: Option<PathBuf>,
    #[garde(range(min = BYTES_MIN, max = BYTES_MAX))]
    pub length: usize,
    #[garde(length(bytes, max = CONTEXTBYTES))]
    pub context: Option<String>,
    #[garde(skip)]
    pub encoding: Encoding,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            key: None,
            length: DEFAULT_LENGTH,
            context: None,
            encoding: Encoding::default(),
        }
    }
}

impl DefaultPathProvider for Config {
    const DEFAULT_FILENAME: &'static str = "config/tessera.toml";
}

use crate::encoding::Encoding;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no master key: pass --key-file or --key-hex, or set kdf.key")]
    MissingKey,

    #[error("no context: pass --context or set kdf.context")]
    MissingContext,

    #[error("--key-hex is not valid hex")]
    InvalidKeyHex,

    #[error("expected subkey is not valid {0}")]
    InvalidEncoding(Encoding),

    #[error("count must be at least 1")]
    EmptyRange,

    #[error("index range overflows: {start} + {count}")]
    IndexOverflow { start: u64, count: u64 },

    #[error(transparent)]
    Kdf(#[from] tessera_crypto::Error),

    #[error(transparent)]
    KeyFile(#[from] tessera_fs::fs::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

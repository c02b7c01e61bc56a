use std::path::PathBuf;

use async_trait::async_trait;
use secstr::SecStr;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: tokio::io::Error,
    },

    #[error("{0} does not contain hex encoded key material")]
    InvalidHex(PathBuf),
}

#[async_trait]
pub trait FileReadExt {
    async fn read_all(self) -> Result<Vec<u8>, tokio::io::Error>;

    /// Reads a hex encoded secret, ignoring surrounding whitespace.
    async fn read_hex_secret(self) -> Result<SecStr, Error>;
}

#[async_trait]
impl FileReadExt for PathBuf {
    #[tracing::instrument]
    async fn read_all(self) -> Result<Vec<u8>, tokio::io::Error> {
        info!(path = %self.display(), "reading file");

        let mut buf = vec![];
        tokio::fs::File::open(self)
            .await?
            .read_to_end(&mut buf)
            .await?;
        Ok(buf)
    }

    #[tracing::instrument]
    async fn read_hex_secret(self) -> Result<SecStr, Error> {
        let contents = SecStr::new(self.clone().read_all().await.map_err(|source| {
            Error::Io {
                path: self.clone(),
                source,
            }
        })?);

        let text = std::str::from_utf8(contents.unsecure())
            .map_err(|_| Error::InvalidHex(self.clone()))?;

        const_hex::decode(text.trim())
            .map(SecStr::new)
            .map_err(|_| Error::InvalidHex(self))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_read_all() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"raw bytes").unwrap();

        let bytes = file.path().to_path_buf().read_all().await.unwrap();
        assert_eq!(bytes, b"raw bytes");
    }

    #[tokio::test]
    async fn test_read_hex_secret() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  000102030405060708090a0b0c0d0e0f  ").unwrap();

        let secret = file.path().to_path_buf().read_hex_secret().await.unwrap();
        assert_eq!(secret.unsecure(), (0u8..16).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_read_hex_secret_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not hex at all").unwrap();

        let secret = file.path().to_path_buf().read_hex_secret().await;
        assert!(matches!(secret, Err(Error::InvalidHex(_))));
    }

    #[tokio::test]
    async fn test_read_hex_secret_missing() {
        let dir = tempfile::tempdir().unwrap();

        let secret = dir.path().join("master.key").read_hex_secret().await;
        assert!(matches!(secret, Err(Error::Io { .. })));
    }
}

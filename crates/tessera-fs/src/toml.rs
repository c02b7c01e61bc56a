use std::{
    future::Future,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::DefaultPathProvider;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("file does not contain valid utf8: {0}")]
    InvalidFileUtf8(PathBuf),

    #[error("failed to parse toml: {0}")]
    Parse(#[from] toml::de::Error),
}

pub trait FromToml: Sized {
    /// Reads a TOML file from the specified path, or the default path if none is provided.
    /// Returns the parsed configuration and the path used.
    #[tracing::instrument]
    fn from_toml_path<P>(path: Option<P>) -> impl Future<Output = Result<(Self, P), Error>> + Send
    where
        P: std::fmt::Debug + AsRef<Path> + From<PathBuf> + Send,
        Self: DeserializeOwned + DefaultPathProvider,
    {
        async {
            let path = match path {
                Some(path) => path,
                None => P::from(Self::default_path()),
            };

            info!(file = %path.as_ref().display(), "reading toml");

            let file_contents = tokio::fs::read(path.as_ref())
                .await
                .map_err(|_| Error::FileNotFound(path.as_ref().into()))?;

            let contents = String::from_utf8(file_contents)
                .map_err(|_| Error::InvalidFileUtf8(path.as_ref().into()))?;

            Ok((toml::from_str(&contents)?, path))
        }
    }

    /// Like [`FromToml::from_toml_path`], but an absent default file yields `Self::default()`.
    /// An explicit path that does not exist is still an error.
    fn from_toml_path_or_default(
        path: Option<PathBuf>,
    ) -> impl Future<Output = Result<(Self, Option<PathBuf>), Error>> + Send
    where
        Self: DeserializeOwned + DefaultPathProvider + Default + Send,
    {
        async {
            if path.is_none() && !Self::default_path_exists().await {
                debug!(file = Self::DEFAULT_FILENAME, "no config file, using defaults");
                return Ok((Self::default(), None));
            }

            let (config, path) = Self::from_toml_path(path).await?;
            Ok((config, Some(path)))
        }
    }
}

impl<T> FromToml for T where T: DeserializeOwned + DefaultPathProvider {}

use std::path::PathBuf;

pub mod fs;
pub mod toml;

/// Types loaded from a well-known file when no path is given.
pub trait DefaultPathProvider: Sized {
    /// Relative to the working directory.
    const DEFAULT_FILENAME: &'static str;

    #[must_use]
    fn default_path() -> PathBuf {
        Self::DEFAULT_FILENAME.into()
    }

    /// Whether the default file is present.
    fn default_path_exists() -> impl std::future::Future<Output = bool> + Send {
        async { tokio::fs::try_exists(Self::default_path()).await.unwrap_or(false) }
    }
}

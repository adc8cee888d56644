use {std::path::Path, tokio::io::AsyncWrite};

pub trait FileHandler {
    type File: AsyncWrite + Send + Unpin + 'static;

    /// Open `path` for appending, creating it if absent.
    async fn open(&mut self, path: &Path) -> std::io::Result<Self::File>;

    /// Move `from` to `to`.
    async fn rename(&mut self, from: &Path, to: &Path) -> std::io::Result<()>;
}

pub struct TokioFileHandler;

impl FileHandler for TokioFileHandler {
    type File = tokio::fs::File;

    async fn open(&mut self, path: &Path) -> std::io::Result<Self::File> {
        let mut options = tokio::fs::OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        options.mode(0o600);
        options.open(path).await
    }

    async fn rename(&mut self, from: &Path, to: &Path) -> std::io::Result<()> {
        tokio::fs::rename(from, to).await
    }
}

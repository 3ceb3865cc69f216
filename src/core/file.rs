use std::{fmt, future::Future, io, path::Path};

use log::debug;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

/// How a physical write opens its target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file, or truncate it when it already exists.
    Truncate,
    /// Create the file when missing, otherwise write at its end.
    Append,
}

impl WriteMode {
    pub fn is_append(&self) -> bool {
        matches!(self, WriteMode::Append)
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Truncate => write!(f, "truncate"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}

/// Writes a whole UTF-8 text block to a named file.
///
/// One call is one physical write: the content must reach the file
/// completely, or the call must fail.
pub trait FileWriter {
    fn write(
        &self,
        path: &Path,
        content: &str,
        mode: WriteMode,
    ) -> impl Future<Output = io::Result<()>> + Send;
}

/// [`FileWriter`] backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileWriter;

impl FileWriter for TokioFileWriter {
    async fn write(&self, path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Truncate => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };

        let mut file = options.open(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        debug!(
            "Wrote {} bytes to {} ({})",
            content.len(),
            path.display(),
            mode
        );
        Ok(())
    }
}

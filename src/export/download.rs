//! Delivering export payloads to a folder on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ExportError;
use crate::traits::DownloadSink;

/// Writes downloads into a directory, never overwriting existing files.
///
/// A name that is taken gets a ` (n)` suffix before the extension.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download folder, else the working directory
    pub fn user_downloads() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// `configured` when set, else the user's download folder
    pub fn with_override(configured: Option<&Path>) -> Self {
        match configured {
            Some(dir) => Self::new(dir),
            None => Self::user_downloads(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn free_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{ext}")),
            None => (file_name, String::new()),
        };
        (1..)
            .map(|n| self.dir.join(format!("{stem} ({n}){ext}")))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl DownloadSink for DirectoryDownloadSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.free_path(file_name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "download written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliver_never_overwrites() {
        let dir = std::env::temp_dir().join(format!("cryptodash-downloads-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let mut sink = DirectoryDownloadSink::new(&dir);

        let first = sink.deliver("analisis_online_2024-03-09.csv", b"a").unwrap();
        let second = sink.deliver("analisis_online_2024-03-09.csv", b"b").unwrap();

        assert_eq!(first.file_name().unwrap(), "analisis_online_2024-03-09.csv");
        assert_eq!(second.file_name().unwrap(), "analisis_online_2024-03-09 (1).csv");
        assert_eq!(fs::read(&first).unwrap(), b"a");
        assert_eq!(fs::read(&second).unwrap(), b"b");

        let _ = fs::remove_dir_all(&dir);
    }
}

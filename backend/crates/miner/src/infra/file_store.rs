//! Local Filesystem Document Store
//!
//! Stores uploaded documents under a root directory:
//! `<root>/<subdir>/<filename>`. Writes go to a temporary file that is
//! synced and renamed into place, so a reader never sees a partial file.

use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::config::MinerConfig;
use crate::domain::repository::DocumentStore;
use crate::error::MinerResult;

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the configured upload directory
    pub fn from_config(config: &MinerConfig) -> Self {
        Self::new(&config.upload_root)
    }

    /// Create the root directory if it does not exist
    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".part");
        let temp_path = PathBuf::from(temp_name);

        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

/// Replace whitespace with `_` and reject names that could escape the
/// target directory.
pub fn sanitize_filename(filename: &str) -> io::Result<String> {
    let name: String = filename
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if name.is_empty() || name == "." || name == ".." {
        return Err(invalid_input(format!("invalid file name {:?}", filename)));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(invalid_input(format!(
            "file name {:?} contains a path separator or NUL",
            filename
        )));
    }
    Ok(name)
}

/// Accept only relative paths made of plain components
fn check_relative(path: &str) -> io::Result<()> {
    if path.is_empty() || path.contains('\0') {
        return Err(invalid_input(format!("invalid relative path {:?}", path)));
    }
    let all_normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if all_normal {
        Ok(())
    } else {
        Err(invalid_input(format!(
            "path {:?} must stay inside the upload root",
            path
        )))
    }
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

impl DocumentStore for LocalFileStore {
    async fn save(&self, subdir: &str, filename: &str, bytes: &[u8]) -> MinerResult<String> {
        let subdir = subdir.trim_matches('/');
        check_relative(subdir)?;
        let filename = sanitize_filename(filename)?;

        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir).await?;
        Self::write_atomic(&dir.join(&filename), bytes).await?;

        let relative = format!("{}/{}", subdir, filename);
        tracing::debug!(path = %relative, bytes = bytes.len(), "Document stored");
        Ok(relative)
    }

    async fn remove(&self, relative_path: &str) -> MinerResult<()> {
        check_relative(relative_path)?;
        match fs::remove_file(self.root.join(relative_path)).await {
            Ok(()) => {
                tracing::debug!(path = %relative_path, "Document removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

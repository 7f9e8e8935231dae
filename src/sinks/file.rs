use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};

use super::FileSaveSink;
use crate::errors::SinkError;

// @module: Export downloads written into a directory

/// Saves exports into a fixed directory, creating it when needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectorySink {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSaveSink for DirectorySink {
    async fn save(&self, content: &str, suggested_filename: &str, mime_type: &str) -> Result<PathBuf, SinkError> {
        let to_error = |e: std::io::Error| SinkError::FileSave {
            filename: suggested_filename.to_string(),
            message: e.to_string(),
        };

        // Only the final path component of the suggestion is honoured
        let filename = Path::new(suggested_filename)
            .file_name()
            .ok_or_else(|| SinkError::FileSave {
                filename: suggested_filename.to_string(),
                message: "empty filename".to_string(),
            })?;
        let path = self.dir.join(filename);

        tokio::fs::create_dir_all(&self.dir).await.map_err(to_error)?;
        tokio::fs::write(&path, content).await.map_err(to_error)?;

        debug!("Saved {} bytes ({}) to {:?}", content.len(), mime_type, path);
        info!("Saved {:?}", path);
        Ok(path)
    }
}

use super::{item_size, KeyValueStore, StorageError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Per-item size limit of a browser sync storage area
pub const DEFAULT_QUOTA_BYTES_PER_ITEM: usize = 8192;

/// Storage area kept in a single JSON object file
///
/// Writes go to a sibling temporary file which is then renamed over the
/// area, so a failed `set` leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes_per_item: usize,
}

impl FileStore {
    /// Create a store for the given area file with the default quota
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes_per_item: DEFAULT_QUOTA_BYTES_PER_ITEM,
        }
    }

    /// Set the per-item quota in bytes (0 disables it)
    #[must_use]
    pub fn with_quota(mut self, quota_bytes_per_item: usize) -> Self {
        self.quota_bytes_per_item = quota_bytes_per_item;
        self
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        io_error(&self.path, source)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "storage".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_area(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn write_area(&self, area: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let mut content = serde_json::to_string_pretty(area)?;
        content.push('\n');

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(&temp, e));
        }
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(io_error(&temp, e));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut area = self.read_area().await?;
        debug!("Read '{}' from {}", key, self.path.display());
        Ok(area.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let size = item_size(key, &value)?;
        if self.quota_bytes_per_item > 0 && size > self.quota_bytes_per_item {
            warn!(
                "Refusing to write '{}': {} bytes exceeds quota of {}",
                key, size, self.quota_bytes_per_item
            );
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                size,
                quota: self.quota_bytes_per_item,
            });
        }

        let mut area = self.read_area().await?;
        area.insert(key.to_string(), value);
        self.write_area(&area).await?;

        debug!("Wrote '{}' ({} bytes) to {}", key, size, self.path.display());
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use super::model::{NewReview, Review, ReviewId};
use super::StoreError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Review storage backed by a single JSON array on disk
///
/// Every operation re-reads the file, so edits made by hand between
/// requests are picked up. Appends inside this process are serialized;
/// several processes sharing one file can still lose updates.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assigns `max(id) + 1` and rewrites the whole file. Records already on
    /// disk are written back untouched, even ones this service cannot read.
    pub async fn append(&self, review: NewReview) -> Result<Review, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await;
        let id = next_id(&records);
        let stored = review.with_id(ReviewId::Seq(id));
        records.push(serde_json::to_value(&stored)?);

        self.save(&records).await?;
        debug!(id, path = %self.path.display(), "Review written to file");

        Ok(stored)
    }

    /// Records that do not match the review shape are skipped.
    pub async fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        let reviews = self
            .load()
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(review) => Some(review),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed review record");
                    None
                }
            })
            .collect();
        Ok(reviews)
    }

    /// Missing, unreadable or non-array content is treated as an empty collection.
    async fn load(&self) -> Vec<Value> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read review file, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                warn!(path = %self.path.display(), "Review file is not a JSON array, treating as empty");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Review file is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, records: &[Value]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Considers every numeric `id`, including those on malformed records.
fn next_id(records: &[Value]) -> u64 {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_u64))
        .max()
        .map_or(1, |max| max + 1)
}

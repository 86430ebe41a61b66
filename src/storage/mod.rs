pub mod file;
pub mod model;
pub mod mongo;

pub use file::JsonFileStore;
pub use model::{NewReview, Review, ReviewId};
pub use mongo::MongoStore;

use crate::config::{StorageBackend, StorageConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("bson encode error: {0}")]
    BsonEncode(#[from] mongodb::bson::ser::Error),

    #[error("bson decode error: {0}")]
    BsonDecode(#[from] mongodb::bson::de::Error),

    #[error("stored document has no _id")]
    MissingId,
}

/// Persistence backend selected at startup
pub enum ReviewStore {
    File(JsonFileStore),
    Document(MongoStore),
}

impl ReviewStore {
    pub async fn from_config(config: &StorageConfig) -> anyhow::Result<Self> {
        match config.backend {
            StorageBackend::File => Ok(Self::File(JsonFileStore::new(&config.data_file))),
            StorageBackend::Document => {
                let uri = config
                    .mongo_uri
                    .as_deref()
                    .ok_or(crate::config::ConfigError::MissingMongoUri)?;
                let store = MongoStore::connect(uri, &config.database, &config.collection).await?;
                Ok(Self::Document(store))
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::File(_) => StorageBackend::File,
            Self::Document(_) => StorageBackend::Document,
        }
    }

    pub async fn append(&self, review: NewReview) -> Result<Review, StoreError> {
        match self {
            Self::File(store) => store.append(review).await,
            Self::Document(store) => store.append(review).await,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        match self {
            Self::File(store) => store.list_all().await,
            Self::Document(store) => store.list_all().await,
        }
    }
}

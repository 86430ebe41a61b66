use super::model::{NewReview, Review, ReviewId};
use super::StoreError;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection};
use tracing::{debug, info};

/// Review storage backed by a MongoDB collection
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        info!(database, collection, "Connected to document store");
        Ok(Self::from_collection(client.database(database).collection(collection)))
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Single insert; the generated `_id` becomes the record id.
    pub async fn append(&self, review: NewReview) -> Result<Review, StoreError> {
        let document = bson::to_document(&review)?;
        let result = self.collection.insert_one(document).await?;
        let id = id_string(result.inserted_id);
        debug!(id = %id, "Review inserted");
        Ok(review.with_id(ReviewId::Doc(id)))
    }

    pub async fn list_all(&self) -> Result<Vec<Review>, StoreError> {
        let documents: Vec<Document> = self.collection.find(doc! {}).await?.try_collect().await?;
        documents.into_iter().map(review_from_document).collect()
    }
}

/// Moves `_id` out of the stored document and exposes it as `id`.
pub fn review_from_document(mut document: Document) -> Result<Review, StoreError> {
    let id = document
        .remove("_id")
        .map(id_string)
        .ok_or(StoreError::MissingId)?;
    let review: NewReview = bson::from_document(document)?;
    Ok(review.with_id(ReviewId::Doc(id)))
}

fn id_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

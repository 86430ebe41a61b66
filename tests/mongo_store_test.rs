//! Runs against a live MongoDB. Set `MONGODB_URI` and use `cargo test -- --ignored`.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use review_feedback_api::enrichment::Feedback;
use review_feedback_api::storage::{MongoStore, NewReview, ReviewId};

#[tokio::test]
#[ignore]
async fn insert_then_list_exposes_only_string_ids() {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI not set, skipping");
        return;
    };
    let database = "review_feedback_api_test";
    let collection = format!("reviews_{}", ObjectId::new().to_hex());

    let store = MongoStore::connect(&uri, database, &collection).await.unwrap();

    let first = store
        .append(NewReview::new(5, "Great".to_string(), Feedback::fallback()))
        .await
        .unwrap();
    let second = store
        .append(NewReview::new(2, "Slow".to_string(), Feedback::fallback()))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert!(matches!(first.id, ReviewId::Doc(ref hex) if hex.len() == 24));

    let listed = store.list_all().await.unwrap();
    let summary: Vec<(ReviewId, &str)> = listed
        .iter()
        .map(|r| (r.id.clone(), r.review.review_text.as_str()))
        .collect();
    assert_eq!(summary, vec![(first.id, "Great"), (second.id, "Slow")]);

    let json = serde_json::to_value(&listed).unwrap();
    for record in json.as_array().unwrap() {
        assert!(record.get("_id").is_none());
        assert!(record["id"].is_string());
    }

    let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
    client
        .database(database)
        .collection::<Document>(&collection)
        .drop()
        .await
        .unwrap();
}

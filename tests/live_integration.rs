use std::time::{SystemTime, UNIX_EPOCH};

use atlas_data_api::{DataApiClient, QueryOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Marker {
    run: String,
    step: u32,
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock must be after epoch")
        .as_millis()
}

#[tokio::test]
async fn live_crud_roundtrip() {
    let client = match DataApiClient::from_env() {
        Ok(client) => client,
        Err(_) => {
            eprintln!("skipping live test: ATLAS_* environment variables not set");
            return;
        }
    };
    let collection = "data_api_live_check";
    let run = format!("run-{}", unique_suffix());

    client
        .try_insert_many(
            collection,
            &[
                Marker {
                    run: run.clone(),
                    step: 1,
                },
                Marker {
                    run: run.clone(),
                    step: 2,
                },
            ],
        )
        .await
        .expect("insert_many must succeed");

    let found = client
        .try_find::<Marker>(
            collection,
            json!({ "run": run }),
            Some(QueryOptions::new().sort(json!({ "step": 1 })).projection(json!({ "_id": 0 }))),
        )
        .await
        .expect("find must succeed");
    assert_eq!(found.documents.len(), 2);
    assert_eq!(found.documents[0].step, 1);

    let updated = client
        .try_update_one(
            collection,
            json!({ "run": run, "step": 2 }),
            json!({ "$set": { "step": 3 } }),
            None,
        )
        .await
        .expect("update_one must succeed");
    assert_eq!(updated.modified_count, 1);

    let deleted = client
        .try_delete_many(collection, json!({ "run": run }))
        .await
        .expect("cleanup must succeed");
    assert_eq!(deleted.deleted_count, 2);
}

use atlas_data_api::{DataApiClient, Oid, QueryOptions};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
    email: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = DataApiClient::from_env()?;

    let inserted = db
        .try_insert_one(
            "users",
            &User {
                name: "Kit".to_owned(),
                email: "kit@example.com".to_owned(),
            },
        )
        .await?;
    println!("inserted {}", inserted.inserted_id);

    let found = db
        .try_find_one::<User>(
            "users",
            json!({ "_id": Oid::from(inserted.inserted_id.as_str()) }),
            None,
        )
        .await?;
    println!("{:?}", found.document);

    let page = db
        .try_find::<User>(
            "users",
            json!({}),
            Some(QueryOptions::new().sort(json!({ "name": 1 })).limit(10)),
        )
        .await?;
    for user in page.documents {
        println!("{user:?}");
    }

    Ok(())
}

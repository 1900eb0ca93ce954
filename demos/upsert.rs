use atlas_data_api::{
    ConnectionConfig, DataApiClient, HttpTransport, TransportOptions, UpdateOptions,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConnectionConfig::from_env()?;
    let transport = HttpTransport::new().with_options(TransportOptions {
        timeout_ms: 5_000,
        max_retries: 2,
        retry_backoff_ms: 200,
    });
    let db = DataApiClient::new(config, transport).with_logger(|message| {
        eprintln!("data api failure: {message}");
    });

    // The never-failing surface: None means the failure went to the logger.
    let Some(result) = db
        .update_one(
            "counters",
            json!({ "_id": "page-views" }),
            json!({ "$inc": { "value": 1 } }),
            Some(UpdateOptions::new().upsert(true)),
        )
        .await
    else {
        return Ok(());
    };

    match result.upserted_id {
        Some(id) => println!("created counter {id}"),
        None => println!("matched {} counter(s)", result.matched_count),
    }

    Ok(())
}

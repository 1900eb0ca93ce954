use std::fmt;
use std::sync::Arc;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_REQUEST_HEADERS, CONTENT_TYPE,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    action::action_url, Action, ActionTransport, AggregateResponse, ConnectionConfig,
    DataApiError, DeleteResponse, FindOneResponse, FindResponse, HttpTransport,
    InsertManyResponse, InsertOneResponse, QueryOptions, ReplaceResponse, RequestSpec, Result,
    UpdateOptions, UpdateResponse,
};

const API_KEY_HEADER: &str = "api-key";

/// Receives the message of every failed operation.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Typed client for the Data API `/action/*` endpoints.
///
/// Each operation comes in two flavors:
/// - `find_one`, `insert_many`, ... never fail: errors are reported to the
///   log sink (or `tracing` when none is set) and the call returns `None`.
/// - `try_find_one`, `try_insert_many`, ... return the [`DataApiError`].
///
/// # Example
///
/// ```no_run
/// use atlas_data_api::{ConnectionConfig, DataApiClient, Oid};
/// use serde_json::{json, Value};
///
/// # async fn run() -> atlas_data_api::Result<()> {
/// let config = ConnectionConfig::from_app_id("data-abcde", "Cluster0", "shop", "api-key")?;
/// let client = DataApiClient::http(config);
///
/// let found = client
///     .find_one::<Value>("users", json!({ "_id": Oid::from("507f1f77bcf86cd799439011") }), None)
///     .await;
/// if let Some(found) = found {
///     println!("{:?}", found.document);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DataApiClient {
    config: Arc<ConnectionConfig>,
    transport: Arc<dyn ActionTransport>,
    log: Option<LogSink>,
}

impl fmt::Debug for DataApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataApiClient")
            .field("config", &self.config)
            .field("transport", &"<dyn ActionTransport>")
            .field("log", &self.log.as_ref().map(|_| "<sink>"))
            .finish()
    }
}

impl DataApiClient {
    /// Creates a client that sends every request through `transport`.
    pub fn new(config: ConnectionConfig, transport: impl ActionTransport + 'static) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            log: None,
        }
    }

    /// Creates a client backed by the built-in [`HttpTransport`].
    pub fn http(config: ConnectionConfig) -> Self {
        Self::new(config, HttpTransport::new())
    }

    /// Creates an HTTP-backed client from `ATLAS_*` environment variables.
    ///
    /// See [`ConnectionConfig::from_env`] for the variables read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Ok(Self::http(ConnectionConfig::from_env()?))
    }

    /// Routes failure messages to `log` instead of `tracing`.
    pub fn with_logger<F>(mut self, log: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Some(Arc::new(log));
        self
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Finds the first document matching `filter`.
    ///
    /// `Some` with `document: None` means the query ran and nothing matched.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
        options: Option<QueryOptions>,
    ) -> Option<FindOneResponse<T>> {
        let result = self.try_find_one(collection, filter, options).await;
        self.settle(Action::FindOne, result)
    }

    pub async fn try_find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
        options: Option<QueryOptions>,
    ) -> Result<FindOneResponse<T>> {
        let spec = RequestSpec::<Value>::new(&self.config, collection)
            .with_filter(filter)
            .with_options(options);
        self.dispatch(Action::FindOne, spec).await
    }

    /// Finds all documents matching `filter`.
    pub async fn find<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
        options: Option<QueryOptions>,
    ) -> Option<FindResponse<T>> {
        let result = self.try_find(collection, filter, options).await;
        self.settle(Action::Find, result)
    }

    pub async fn try_find<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
        options: Option<QueryOptions>,
    ) -> Result<FindResponse<T>> {
        let spec = RequestSpec::<Value>::new(&self.config, collection)
            .with_filter(filter)
            .with_options(options);
        self.dispatch(Action::Find, spec).await
    }

    pub async fn insert_one<D: Serialize>(
        &self,
        collection: &str,
        document: &D,
    ) -> Option<InsertOneResponse> {
        let result = self.try_insert_one(collection, document).await;
        self.settle(Action::InsertOne, result)
    }

    pub async fn try_insert_one<D: Serialize>(
        &self,
        collection: &str,
        document: &D,
    ) -> Result<InsertOneResponse> {
        let spec = RequestSpec::new(&self.config, collection).with_document(document);
        self.dispatch(Action::InsertOne, spec).await
    }

    pub async fn insert_many<D: Serialize>(
        &self,
        collection: &str,
        documents: &[D],
    ) -> Option<InsertManyResponse> {
        let result = self.try_insert_many(collection, documents).await;
        self.settle(Action::InsertMany, result)
    }

    pub async fn try_insert_many<D: Serialize>(
        &self,
        collection: &str,
        documents: &[D],
    ) -> Result<InsertManyResponse> {
        let spec = RequestSpec::new(&self.config, collection).with_documents(documents);
        self.dispatch(Action::InsertMany, spec).await
    }

    pub async fn delete_one(&self, collection: &str, filter: Value) -> Option<DeleteResponse> {
        let result = self.try_delete_one(collection, filter).await;
        self.settle(Action::DeleteOne, result)
    }

    pub async fn try_delete_one(&self, collection: &str, filter: Value) -> Result<DeleteResponse> {
        let spec = RequestSpec::<Value>::new(&self.config, collection).with_filter(filter);
        self.dispatch(Action::DeleteOne, spec).await
    }

    pub async fn delete_many(&self, collection: &str, filter: Value) -> Option<DeleteResponse> {
        let result = self.try_delete_many(collection, filter).await;
        self.settle(Action::DeleteMany, result)
    }

    pub async fn try_delete_many(
        &self,
        collection: &str,
        filter: Value,
    ) -> Result<DeleteResponse> {
        let spec = RequestSpec::<Value>::new(&self.config, collection).with_filter(filter);
        self.dispatch(Action::DeleteMany, spec).await
    }

    /// Applies `update` operators (e.g. `{"$set": {...}}`) to the first match.
    ///
    /// `upsert` is always sent; `None` options send `"upsert": false`.
    pub async fn update_one(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
        options: Option<UpdateOptions>,
    ) -> Option<UpdateResponse> {
        let result = self.try_update_one(collection, filter, update, options).await;
        self.settle(Action::UpdateOne, result)
    }

    pub async fn try_update_one(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
        options: Option<UpdateOptions>,
    ) -> Result<UpdateResponse> {
        let spec = RequestSpec::<Value>::new(&self.config, collection)
            .with_filter(filter)
            .with_update(update)
            .with_upsert(options.unwrap_or_default().upsert);
        self.dispatch(Action::UpdateOne, spec).await
    }

    pub async fn update_many(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
        options: Option<UpdateOptions>,
    ) -> Option<UpdateResponse> {
        let result = self.try_update_many(collection, filter, update, options).await;
        self.settle(Action::UpdateMany, result)
    }

    pub async fn try_update_many(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
        options: Option<UpdateOptions>,
    ) -> Result<UpdateResponse> {
        let spec = RequestSpec::<Value>::new(&self.config, collection)
            .with_filter(filter)
            .with_update(update)
            .with_upsert(options.unwrap_or_default().upsert);
        self.dispatch(Action::UpdateMany, spec).await
    }

    /// Replaces the first match with `replacement`.
    pub async fn replace_one<D: Serialize>(
        &self,
        collection: &str,
        filter: Value,
        replacement: &D,
        options: Option<UpdateOptions>,
    ) -> Option<ReplaceResponse> {
        let result = self
            .try_replace_one(collection, filter, replacement, options)
            .await;
        self.settle(Action::ReplaceOne, result)
    }

    pub async fn try_replace_one<D: Serialize>(
        &self,
        collection: &str,
        filter: Value,
        replacement: &D,
        options: Option<UpdateOptions>,
    ) -> Result<ReplaceResponse> {
        let spec = RequestSpec::new(&self.config, collection)
            .with_filter(filter)
            .with_replacement(replacement)
            .with_upsert(options.unwrap_or_default().upsert);
        self.dispatch(Action::ReplaceOne, spec).await
    }

    /// Runs an aggregation pipeline, e.g. `[{"$match": {...}}, {"$group": {...}}]`.
    pub async fn aggregate<T: DeserializeOwned>(
        &self,
        collection: &str,
        pipeline: Vec<Value>,
    ) -> Option<AggregateResponse<T>> {
        let result = self.try_aggregate(collection, pipeline).await;
        self.settle(Action::Aggregate, result)
    }

    pub async fn try_aggregate<T: DeserializeOwned>(
        &self,
        collection: &str,
        pipeline: Vec<Value>,
    ) -> Result<AggregateResponse<T>> {
        let spec = RequestSpec::<Value>::new(&self.config, collection).with_pipeline(pipeline);
        self.dispatch(Action::Aggregate, spec).await
    }

    async fn dispatch<D, R>(&self, action: Action, spec: RequestSpec<'_, D>) -> Result<R>
    where
        D: Serialize,
        R: DeserializeOwned,
    {
        tracing::debug!(%action, collection = spec.collection, "sending data api request");

        // The body and headers are owned values; nothing borrowed from the
        // caller is held across the transport call.
        let body = encode_body(action, spec)?;
        let headers = self.headers()?;
        let url = action_url(self.config.endpoint(), action);

        let text = self.transport.request(&url, &body, &headers, action).await?;
        serde_json::from_str::<R>(&text).map_err(|err| {
            DataApiError::Decode(format!("invalid {action} response JSON: {err}"))
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut api_key = HeaderValue::from_str(self.config.api_key())
            .map_err(|err| DataApiError::Encode(format!("invalid api-key header value: {err}")))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_CONTROL_REQUEST_HEADERS, HeaderValue::from_static("*"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        Ok(headers)
    }

    fn settle<R>(&self, action: Action, result: Result<R>) -> Option<R> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let message = err.to_string();
                match &self.log {
                    Some(log) => log(&message),
                    None => tracing::error!(%action, "data api request failed: {message}"),
                }
                None
            }
        }
    }
}

fn encode_body<D: Serialize>(action: Action, spec: RequestSpec<'_, D>) -> Result<Value> {
    serde_json::to_value(&spec)
        .map_err(|err| DataApiError::Encode(format!("invalid {action} request body: {err}")))
}

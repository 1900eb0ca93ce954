use serde::Serialize;
use serde_json::Value;

use crate::{ConnectionConfig, QueryOptions};

/// Request body for a single Data API action.
///
/// `dataSource`, `database` and `collection` are always present. Every other
/// field is omitted from the JSON body unless it was set, which keeps an
/// explicit `limit: Some(0)` or `upsert: Some(false)` distinct from "not
/// provided".
///
/// `D` is the caller's document type for `document`, `documents` and
/// `replacement`; operations that carry no documents use the default.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec<'a, D = Value> {
    pub data_source: &'a str,
    pub database: &'a str,
    pub collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Update operator document, e.g. `{"$set": {...}}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<&'a D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<&'a D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<&'a [D]>,
    /// Aggregation stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Vec<Value>>,
}

impl<'a, D> RequestSpec<'a, D> {
    /// Creates a body scoped to `collection` with no optional fields set.
    pub fn new(config: &'a ConnectionConfig, collection: &'a str) -> Self {
        Self {
            data_source: config.data_source(),
            database: config.database(),
            collection,
            filter: None,
            update: None,
            upsert: None,
            replacement: None,
            projection: None,
            sort: None,
            limit: None,
            skip: None,
            document: None,
            documents: None,
            pipeline: None,
        }
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_update(mut self, update: Value) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = Some(upsert);
        self
    }

    pub fn with_replacement(mut self, replacement: &'a D) -> Self {
        self.replacement = Some(replacement);
        self
    }

    pub fn with_document(mut self, document: &'a D) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_documents(mut self, documents: &'a [D]) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn with_pipeline(mut self, pipeline: Vec<Value>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Copies each option that is `Some`; `None` leaves the body untouched.
    pub fn with_options(mut self, options: Option<QueryOptions>) -> Self {
        let Some(options) = options else {
            return self;
        };
        if let Some(sort) = options.sort {
            self.sort = Some(sort);
        }
        if let Some(limit) = options.limit {
            self.limit = Some(limit);
        }
        if let Some(skip) = options.skip {
            self.skip = Some(skip);
        }
        if let Some(projection) = options.projection {
            self.projection = Some(projection);
        }
        self
    }
}

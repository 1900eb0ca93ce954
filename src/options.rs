/// Configures timeout and retry behavior of [`HttpTransport`](crate::HttpTransport).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_backoff_ms: u64,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 0,
            retry_backoff_ms: 250,
        }
    }
}

/// Optional modifiers for `find` and `find_one`.
///
/// Only the fields set to `Some` are sent, so `limit: Some(0)` reaches the
/// server as `"limit": 0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Sort document, e.g. `{"createdAt": -1}`.
    pub sort: Option<serde_json::Value>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    /// Projection document, e.g. `{"name": 1, "_id": 0}`.
    pub projection: Option<serde_json::Value>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: serde_json::Value) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn projection(mut self, projection: serde_json::Value) -> Self {
        self.projection = Some(projection);
        self
    }
}

/// Optional modifiers for `update_one`, `update_many` and `replace_one`.
///
/// Passing `None` to those operations is the same as `UpdateOptions::default()`,
/// which sends `"upsert": false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a new document when nothing matches the filter.
    pub upsert: bool,
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }
}

use serde::Deserialize;

/// Result of `findOne`. `document` is `None` when nothing matched.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FindOneResponse<T> {
    pub document: Option<T>,
}

/// Result of `find`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FindResponse<T> {
    pub documents: Vec<T>,
}

/// Result of `aggregate`; same shape as [`FindResponse`].
pub type AggregateResponse<T> = FindResponse<T>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResponse {
    pub inserted_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertManyResponse {
    pub inserted_ids: Vec<String>,
}

/// Result of `deleteOne` and `deleteMany`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

/// Result of `updateOne` and `updateMany`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Set only when the operation inserted a new document.
    #[serde(default)]
    pub upserted_id: Option<String>,
}

/// Result of `replaceOne`; same shape as [`UpdateResponse`].
pub type ReplaceResponse = UpdateResponse;

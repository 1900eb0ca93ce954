use serde::{Deserialize, Serialize};

/// Object identifier in extended-JSON form, encoded as `{"$oid": "<hex>"}`.
///
/// Use it wherever an `_id` appears in a filter or document:
///
/// ```
/// use atlas_data_api::Oid;
/// use serde_json::json;
///
/// let filter = json!({ "_id": Oid::from("507f1f77bcf86cd799439011") });
/// assert_eq!(filter, json!({ "_id": { "$oid": "507f1f77bcf86cd799439011" } }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Oid {
    #[serde(rename = "$oid")]
    oid: String,
}

impl Oid {
    pub fn new(hex: impl Into<String>) -> Self {
        Self { oid: hex.into() }
    }

    /// Hex string carried by this identifier.
    pub fn as_str(&self) -> &str {
        &self.oid
    }
}

impl From<&str> for Oid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Oid {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<bson::oid::ObjectId> for Oid {
    fn from(value: bson::oid::ObjectId) -> Self {
        Self::new(value.to_hex())
    }
}

impl From<&bson::oid::ObjectId> for Oid {
    fn from(value: &bson::oid::ObjectId) -> Self {
        Self::new(value.to_hex())
    }
}

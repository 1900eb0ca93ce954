use std::fmt;

use crate::{DataApiError, Result};

/// Formats a Data API application ID into its default endpoint URL.
///
/// Example: `"data-abcde"` → `"https://data.mongodb-api.com/app/data-abcde/endpoint/data/v1"`
pub fn app_id_to_endpoint(app_id: &str) -> String {
    format!(
        "https://data.mongodb-api.com/app/{}/endpoint/data/v1",
        app_id.trim()
    )
}

/// Connection settings shared by every request a client sends.
///
/// All four values are required and immutable once the config is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    data_source: String,
    database: String,
    api_key: String,
    endpoint: String,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("data_source", &self.data_source)
            .field("database", &self.database)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ConnectionConfig {
    /// Creates a config, failing with [`DataApiError::Config`] when any
    /// value is empty or whitespace-only.
    ///
    /// # Example
    ///
    /// ```
    /// use atlas_data_api::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::new(
    ///     "Cluster0",
    ///     "shop",
    ///     "my-api-key",
    ///     "https://data.mongodb-api.com/app/data-abcde/endpoint/data/v1",
    /// )
    /// .expect("all fields are present");
    /// assert_eq!(config.database(), "shop");
    /// ```
    pub fn new(
        data_source: impl Into<String>,
        database: impl Into<String>,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            data_source: required("data_source", data_source.into())?,
            database: required("database", database.into())?,
            api_key: required("api_key", api_key.into())?,
            endpoint: required("endpoint", endpoint.into())?,
        })
    }

    /// Creates a config for an application ID on the default Data API host.
    pub fn from_app_id(
        app_id: impl AsRef<str>,
        data_source: impl Into<String>,
        database: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let app_id = required("app_id", app_id.as_ref().to_owned())?;
        Self::new(data_source, database, api_key, app_id_to_endpoint(&app_id))
    }

    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `ATLAS_DATA_SOURCE` — cluster name (e.g. `Cluster0`)
    /// - `ATLAS_DATABASE` — database name
    /// - `ATLAS_API_KEY` — Data API key
    /// - `ATLAS_ENDPOINT` — endpoint base URL, without the `/action/...` suffix
    ///
    /// **Not available on `wasm32` targets.**
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        Self::new(
            env_var("ATLAS_DATA_SOURCE")?,
            env_var("ATLAS_DATABASE")?,
            env_var("ATLAS_API_KEY")?,
            env_var("ATLAS_ENDPOINT")?,
        )
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(DataApiError::Config(format!("{field} is required")));
    }
    Ok(value)
}

#[cfg(not(target_arch = "wasm32"))]
fn env_var(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| DataApiError::Config(format!("missing {name} environment variable")))?;
    if value.trim().is_empty() {
        return Err(DataApiError::Config(format!("{name} is set but empty")));
    }
    Ok(value)
}

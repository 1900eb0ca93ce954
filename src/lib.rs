//! `atlas-data-api` is a typed async client for document-database Data API
//! endpoints (`<endpoint>/action/<name>`).
//!
//! [`DataApiClient`] turns typed calls into JSON request bodies and decodes
//! the responses:
//! - [`DataApiClient::find_one`] / [`DataApiClient::find`]
//! - [`DataApiClient::insert_one`] / [`DataApiClient::insert_many`]
//! - [`DataApiClient::update_one`] / [`DataApiClient::update_many`]
//! - [`DataApiClient::replace_one`]
//! - [`DataApiClient::delete_one`] / [`DataApiClient::delete_many`]
//! - [`DataApiClient::aggregate`]
//!
//! The network round trip is delegated to an [`ActionTransport`]. The crate
//! ships [`HttpTransport`] (reqwest); tests and embedders can supply their own.

mod action;
mod client;
mod config;
mod error;
mod oid;
mod options;
mod transport;
mod types;
mod wire;

pub use action::Action;
pub use client::{DataApiClient, LogSink};
pub use config::{app_id_to_endpoint, ConnectionConfig};
pub use error::DataApiError;
pub use oid::Oid;
pub use options::{QueryOptions, TransportOptions, UpdateOptions};
pub use transport::{ActionTransport, HttpTransport};
pub use types::{
    AggregateResponse, DeleteResponse, FindOneResponse, FindResponse, InsertManyResponse,
    InsertOneResponse, ReplaceResponse, UpdateResponse,
};
pub use wire::RequestSpec;

pub type Result<T> = std::result::Result<T, DataApiError>;

//! Reqwest adapters for the record and auth endpoints.
//!
//! These adapters own transport details only: URL building, request
//! serialisation, timeout and HTTP error mapping, and JSON decoding into
//! domain records.

mod auth_client;
mod dto;
mod record_client;
mod transport;

pub use auth_client::HttpAuthService;
pub use record_client::HttpRecordService;

// edgely-api: Async Rust client for the Ubiquiti EdgeOS router management API

pub mod auth;
pub mod client;
pub mod config_tree;
pub mod error;
pub mod models;
pub mod operations;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use client::EdgeClient;
pub use config_tree::ConfigOperation;
pub use error::Error;
pub use models::{BatchEntry, BatchOp, ConfigResponse};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};

// cantina-api: Async Rust client for the CantinaSoft back-office REST API

pub mod auth;
pub mod client;
pub mod envelope;
pub mod error;
pub mod page;
pub mod transport;

pub use auth::{CredentialStore, StaticToken};
pub use client::HttpClient;
pub use envelope::FieldError;
pub use error::{Error, ErrorKind};
pub use page::{Page, PageParams, Pagination};
pub use transport::{TlsMode, TransportConfig};

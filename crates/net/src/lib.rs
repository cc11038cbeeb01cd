//! CSS Macros Network Layer
//!
//! Loads stylesheet source text over HTTP/HTTPS or from the local
//! filesystem.

mod client;
mod error;
mod loader;
mod response;

pub use client::{ClientConfig, HttpClient};
pub use error::{NetError, NetResult};
pub use loader::{SourceLoader, SourceLocator};
pub use response::Response;

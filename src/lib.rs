//! Authority registry client
//!
//! Queries external authority-file registries (persons, places, organisations,
//! terms, abbreviations) and normalizes their responses into one schema.

pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod observability;
pub mod render;
pub mod types;

// Layered boundaries for application ports and infrastructure adapters
pub mod app;
pub mod infra;

pub use apis::{KbgaRegistry, Registry};
pub use config::{Config, RegistryConfig};
pub use error::{ErrorKind, ProviderError, Result};
pub use render::{HtmlBuffer, RenderTarget};
pub use types::{AuthorityDetails, AuthorityRecord, GeoPoint, InfoResult, RegisterKind, SearchResponse, SearchResult};

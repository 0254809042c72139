use std::borrow::Cow;

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::normalize;
use crate::render::{render_record, RenderTarget};
use crate::types::{AuthorityRecord, InfoResult, SearchResponse};
use tracing::debug;

/// Capability every authority provider exposes, independent of the remote API's shape.
///
/// Calls on one instance are independent: nothing is cached or queued between them,
/// and no call is retried.
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Name reported in `SearchResult::provider`
    fn provider_name(&self) -> &'static str;

    fn config(&self) -> &RegistryConfig;

    fn label_field(&self) -> &'static str {
        normalize::label_field(&self.config().register)
    }

    fn api_segment(&self) -> Cow<'_, str> {
        let config = self.config();
        normalize::api_segment(&config.register, config.api_override.as_deref())
    }

    /// Free-text search. Issues exactly one remote request per call; empty
    /// keys are not special-cased.
    async fn query(&self, key: &str) -> Result<SearchResponse>;

    /// Fetch and normalize the full record addressed by `key`
    async fn get_record(&self, key: &str) -> Result<AuthorityRecord>;

    /// Render the record for `key` into `sink` and return its identity.
    ///
    /// An empty key resolves to [`InfoResult::default`] without a remote call
    /// and leaves `sink` untouched.
    async fn info(&self, key: &str, sink: &dyn RenderTarget) -> Result<InfoResult> {
        if key.is_empty() {
            debug!("Empty key passed to info; skipping lookup");
            return Ok(InfoResult::default());
        }

        let record = self.get_record(key).await?;
        let html = render_record(&record)?;
        sink.set_content(html);

        Ok(InfoResult {
            id: Some(record.id),
            strings: vec![record.name],
        })
    }
}

/// Provider-local identifier for a caller-supplied key.
///
/// Strips this registry's `"{prefix}:"` namespace, then keeps the part after
/// the last `-` so composite ids like `kbga-actors-P0042` resolve to `P0042`.
pub fn local_id<'a>(key: &'a str, id_prefix: Option<&str>) -> &'a str {
    let unprefixed = id_prefix
        .and_then(|prefix| key.strip_prefix(prefix))
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(key);
    match unprefixed.rsplit_once('-') {
        Some((_, suffix)) if !suffix.is_empty() => suffix,
        _ => unprefixed,
    }
}

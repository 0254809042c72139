use crate::apis::base::{local_id, Registry};
use crate::app::ports::HttpClientPort;
use crate::config::RegistryConfig;
use crate::constants::{KBGA_BASE_URL, KBGA_DISPLAY_NAME};
use crate::error::{ProviderError, Result};
use crate::normalize;
use crate::observability::metrics;
use crate::types::{AuthorityDetails, AuthorityRecord, GeoPoint, RegisterKind, SearchResponse, SearchResult};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Search envelope: `{ meta: { total }, data: [hit, ...] }`
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    meta: SearchMeta,
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchMeta {
    total: u64,
}

/// Karl Barth-Gesamtausgabe metadata API
pub struct KbgaRegistry {
    http: Box<dyn HttpClientPort>,
    base_url: String,
    config: RegistryConfig,
}

impl KbgaRegistry {
    pub fn new(config: RegistryConfig, http: Box<dyn HttpClientPort>) -> Self {
        Self {
            http,
            base_url: KBGA_BASE_URL.to_string(),
            config,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn collection_url(&self) -> Result<Url> {
        let raw = format!("{}/api/{}", self.base_url, self.api_segment());
        Url::parse(&raw)
            .map_err(|e| ProviderError::Config(format!("Invalid provider URL '{}': {}", raw, e)))
    }

    /// `{base}/api/{segment}?search={key}`
    pub fn search_url(&self, key: &str) -> Result<Url> {
        let mut url = self.collection_url()?;
        url.query_pairs_mut().append_pair("search", key);
        Ok(url)
    }

    /// `{base}/api/{segment}/{local id}`
    pub fn record_url(&self, local_id: &str) -> Result<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Config(format!("Provider URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(local_id);
        Ok(url)
    }

    async fn fetch_json(&self, url: &Url, operation: &'static str) -> Result<Value> {
        let start = Instant::now();
        let outcome = self.fetch_json_inner(url).await;
        metrics::registry::request_duration(self.provider_name(), start.elapsed().as_secs_f64());

        match &outcome {
            Ok(_) => metrics::registry::request_success(self.provider_name(), operation),
            Err(e) => {
                warn!(url = %url, error = %e, "{} request failed", operation);
                metrics::registry::request_error(self.provider_name(), operation, e.kind_label());
            }
        }
        outcome
    }

    async fn fetch_json_inner(&self, url: &Url) -> Result<Value> {
        debug!(url = %url, "Fetching from KBGA");
        let response = self.http.get(url.as_str()).await?;

        if response.status == 404 {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if !response.is_success() {
            return Err(ProviderError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        if !response.is_json() {
            return Err(ProviderError::ContentType {
                content_type: response.content_type,
                url: url.to_string(),
            });
        }

        Ok(serde_json::from_slice(&response.bytes)?)
    }

    /// Whether a hit belongs to the configured register.
    ///
    /// The actor collection serves persons and organisations together, so there
    /// the hit must carry the matching `authority_type`. Dedicated collections
    /// keep every hit; a mismatching type there is only logged.
    fn accepts_hit(&self, hit: &Value) -> bool {
        let expected = self.config.register.as_str();
        let actual = hit.get("authority_type").and_then(Value::as_str);

        if normalize::mixed_collection(&self.config.register) {
            return actual == Some(expected);
        }
        if let Some(actual) = actual {
            if !actual.eq_ignore_ascii_case(expected) {
                warn!(
                    expected,
                    actual,
                    "Dedicated collection returned a hit of another authority type"
                );
            }
        }
        true
    }

    /// Map one raw search hit. `Ok(None)` means the hit was filtered out.
    pub fn map_hit(&self, hit: &Value) -> Result<Option<SearchResult>> {
        if !self.accepts_hit(hit) {
            return Ok(None);
        }

        let label_field = self.label_field();
        let full_id = text_field(hit, "full-id")
            .ok_or_else(|| ProviderError::MissingField("full-id in search hit".into()))?;
        let label = hit
            .as_object()
            .and_then(|object| label_text(object, label_field))
            .ok_or_else(|| {
                ProviderError::MissingField(format!("{} in search hit {}", label_field, full_id))
            })?;
        let record_id = text_field(hit, "id").unwrap_or_else(|| full_id.clone());

        Ok(Some(SearchResult {
            register: self.config.register.clone(),
            id: self.config.prefixed_id(&full_id),
            label: label.clone(),
            details: full_id,
            link: format!("{}/{}/{}", self.base_url, self.api_segment(), record_id),
            strings: vec![label],
            provider: self.provider_name().to_string(),
        }))
    }

    /// Build the normalized record from a record-endpoint payload.
    /// `fallback_id` is used when the payload carries no `full-id`.
    pub fn map_record(&self, payload: Value, fallback_id: &str) -> Result<AuthorityRecord> {
        let data = match payload.get("data") {
            None => return Err(ProviderError::MissingField("data".into())),
            Some(Value::Null) => return Err(ProviderError::NotFound(fallback_id.to_string())),
            Some(Value::Object(data)) => data,
            Some(_) => return Err(ProviderError::MissingField("data object".into())),
        };

        let label_field = self.label_field();
        let name = label_text(data, label_field)
            .ok_or_else(|| ProviderError::MissingField(format!("{} in record {}", label_field, fallback_id)))?;
        let full_id = object_text(data, "full-id").unwrap_or_else(|| fallback_id.to_string());

        let details = match self.config.register {
            RegisterKind::Place => AuthorityDetails::Place {
                country: object_text(data, "country"),
                location: location(data)?,
                links: data
                    .get("links")
                    .and_then(Value::as_array)
                    .map(|links| {
                        links
                            .iter()
                            .filter_map(|link| text_field(link, "url"))
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            RegisterKind::Person => AuthorityDetails::Person {
                birth: object_text(data, "birth"),
                death: object_text(data, "death"),
                note: object_text(data, "note_bio"),
                links: text_field(&payload, "wikipediaURL")
                    .map(|url| vec![absolute_url(&url)])
                    .unwrap_or_default(),
            },
            _ => AuthorityDetails::Basic,
        };

        Ok(AuthorityRecord {
            id: self.config.prefixed_id(&full_id),
            name,
            details,
            raw: payload,
        })
    }
}

#[async_trait::async_trait]
impl Registry for KbgaRegistry {
    fn provider_name(&self) -> &'static str {
        KBGA_DISPLAY_NAME
    }

    fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[instrument(skip(self))]
    async fn query(&self, key: &str) -> Result<SearchResponse> {
        let url = self.search_url(key)?;
        let payload = self.fetch_json(&url, "query").await?;
        let envelope: SearchEnvelope = serde_json::from_value(payload)?;

        let mut items = Vec::with_capacity(envelope.data.len());
        for hit in &envelope.data {
            if let Some(result) = self.map_hit(hit)? {
                items.push(result);
            }
        }

        let filtered = envelope.data.len() - items.len();
        if filtered > 0 {
            debug!(filtered, "Dropped hits of other authority types");
            metrics::registry::hits_filtered(self.provider_name(), filtered);
        }
        metrics::registry::hits_returned(self.provider_name(), items.len());
        info!(
            "Search in {} register returned {} of {} reported hits from {}",
            self.config.register,
            items.len(),
            envelope.meta.total,
            self.provider_name()
        );

        Ok(SearchResponse {
            total_items: envelope.meta.total,
            items,
        })
    }

    #[instrument(skip(self))]
    async fn get_record(&self, key: &str) -> Result<AuthorityRecord> {
        let id = local_id(key, self.config.id_prefix.as_deref());
        let url = self.record_url(id)?;
        let payload = self.fetch_json(&url, "record").await?;
        let record = self.map_record(payload, id)?;

        metrics::registry::record_fetched(self.provider_name());
        debug!(id = %record.id, "Fetched authority record");
        Ok(record)
    }
}

/// String or numeric field as text; empty strings count as absent
fn text_field(value: &Value, key: &str) -> Option<String> {
    value.as_object().and_then(|object| object_text(object, key))
}

fn object_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Label column as given; present but blank is still a label
fn label_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// GeoJSON `location.coordinates`, ordered `[lon, lat]`
fn location(data: &Map<String, Value>) -> Result<Option<GeoPoint>> {
    let coordinates = match data.get("location") {
        None | Some(Value::Null) => return Ok(None),
        Some(location) => location.get("coordinates"),
    };
    match coordinates.and_then(Value::as_array).map(Vec::as_slice) {
        Some([lon, lat, ..]) => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => Ok(Some(GeoPoint { lat, lon })),
            _ => Err(ProviderError::MissingField("numeric location.coordinates".into())),
        },
        None => Ok(None),
        Some(_) => Err(ProviderError::MissingField("location.coordinates pair".into())),
    }
}

/// The API reports Wikipedia links without a scheme
fn absolute_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

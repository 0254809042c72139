//! Metric names and recording helpers for registry calls.
//!
//! Recording goes through the `metrics` facade, so every helper is a no-op
//! until the embedding application installs a recorder.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RegistryRequestsSuccess,
    RegistryRequestsError,
    RegistryRequestDuration,
    RegistryHitsReturned,
    RegistryHitsFiltered,
    RegistryRecordsFetched,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RegistryRequestsSuccess => "authority_registry_requests_success_total",
            MetricName::RegistryRequestsError => "authority_registry_requests_error_total",
            MetricName::RegistryRequestDuration => "authority_registry_request_duration_seconds",
            MetricName::RegistryHitsReturned => "authority_registry_hits_returned_total",
            MetricName::RegistryHitsFiltered => "authority_registry_hits_filtered_total",
            MetricName::RegistryRecordsFetched => "authority_registry_records_fetched_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            RegistryRequestsSuccess,
            RegistryRequestsError,
            RegistryRequestDuration,
            RegistryHitsReturned,
            RegistryHitsFiltered,
            RegistryRecordsFetched,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod registry {
    use super::MetricName;

    /// Record a successful remote request
    pub fn request_success(provider: &str, operation: &'static str) {
        ::metrics::counter!(
            MetricName::RegistryRequestsSuccess.as_str(),
            "provider" => provider.to_string(),
            "operation" => operation
        )
        .increment(1);
    }

    /// Record a failed remote request
    pub fn request_error(provider: &str, operation: &'static str, error_kind: &'static str) {
        ::metrics::counter!(
            MetricName::RegistryRequestsError.as_str(),
            "provider" => provider.to_string(),
            "operation" => operation,
            "error_kind" => error_kind
        )
        .increment(1);
    }

    pub fn request_duration(provider: &str, secs: f64) {
        ::metrics::histogram!(
            MetricName::RegistryRequestDuration.as_str(),
            "provider" => provider.to_string()
        )
        .record(secs);
    }

    pub fn hits_returned(provider: &str, count: usize) {
        ::metrics::counter!(
            MetricName::RegistryHitsReturned.as_str(),
            "provider" => provider.to_string()
        )
        .increment(count as u64);
    }

    /// Hits dropped because their authority type did not match the register
    pub fn hits_filtered(provider: &str, count: usize) {
        ::metrics::counter!(
            MetricName::RegistryHitsFiltered.as_str(),
            "provider" => provider.to_string()
        )
        .increment(count as u64);
    }

    pub fn record_fetched(provider: &str) {
        ::metrics::counter!(
            MetricName::RegistryRecordsFetched.as_str(),
            "provider" => provider.to_string()
        )
        .increment(1);
    }
}

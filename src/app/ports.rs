use async_trait::async_trait;

use crate::error::Result;

/// Outbound HTTP boundary. Providers fetch through this so transports can be
/// swapped (and faked in tests) without touching mapping code.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    /// Empty when the response carried no `Content-Type` header
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the body may be JSON. A missing content type is given the benefit of the doubt.
    pub fn is_json(&self) -> bool {
        let media_type = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        media_type.is_empty() || media_type.ends_with("/json") || media_type.ends_with("+json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_content_type(content_type: &str) -> HttpGetResult {
        HttpGetResult {
            status: 200,
            bytes: Vec::new(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_json_content_types() {
        assert!(with_content_type("application/json").is_json());
        assert!(with_content_type("application/json; charset=utf-8").is_json());
        assert!(with_content_type("application/vnd.api+json").is_json());
        assert!(with_content_type("").is_json());
        assert!(!with_content_type("text/html; charset=utf-8").is_json());
    }
}

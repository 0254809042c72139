use askama::Template;
use std::sync::Mutex;

use crate::error::Result;
use crate::types::{AuthorityDetails, AuthorityRecord};

/// Destination for a rendered detail fragment.
///
/// `info` assigns content once per successful call. Concurrent calls sharing a
/// target are not ordered: whichever resolves last is what the target holds.
pub trait RenderTarget: Send + Sync {
    fn set_content(&self, html: String);
}

/// In-memory target that keeps the most recent assignment
#[derive(Debug, Default)]
pub struct HtmlBuffer {
    content: Mutex<Option<String>>,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().ok().and_then(|c| c.clone())
    }
}

impl RenderTarget for HtmlBuffer {
    fn set_content(&self, html: String) {
        if let Ok(mut content) = self.content.lock() {
            *content = Some(html);
        }
    }
}

#[derive(Template)]
#[template(path = "authority_info.html")]
struct AuthorityInfoTemplate<'a> {
    name: &'a str,
    link: Option<&'a str>,
    birth: Option<&'a str>,
    death: Option<&'a str>,
    note: Option<&'a str>,
    country: Option<&'a str>,
}

/// Render the detail fragment shown for a selected entity
pub fn render_record(record: &AuthorityRecord) -> Result<String> {
    let mut template = AuthorityInfoTemplate {
        name: &record.name,
        link: record.links().first().map(String::as_str),
        birth: None,
        death: None,
        note: None,
        country: None,
    };

    match &record.details {
        AuthorityDetails::Person { birth, death, note, .. } => {
            template.birth = birth.as_deref();
            template.death = death.as_deref();
            template.note = note.as_deref();
        }
        AuthorityDetails::Place { country, .. } => {
            template.country = country.as_deref();
        }
        AuthorityDetails::Basic => {}
    }

    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(birth: Option<&str>, death: Option<&str>) -> AuthorityRecord {
        AuthorityRecord {
            id: "P0042".into(),
            name: "Barth, Karl".into(),
            details: AuthorityDetails::Person {
                birth: birth.map(str::to_string),
                death: death.map(str::to_string),
                note: Some("Theologe".into()),
                links: vec!["https://de.wikipedia.org/wiki/Karl_Barth".into()],
            },
            raw: json!({}),
        }
    }

    #[test]
    fn test_person_fragment_includes_dates_and_note() {
        let html = render_record(&person(Some("1886-05-10"), Some("1968-12-10"))).unwrap();
        assert!(html.contains(r#"<h3 class="label">"#));
        assert!(html.contains("Barth, Karl"));
        assert!(html.contains("de.wikipedia.org"));
        assert!(html.contains("* 1886-05-10"));
        assert!(html.contains("† 1968-12-10"));
        assert!(html.contains("<p>Theologe</p>"));
    }

    #[test]
    fn test_death_without_birth_is_not_shown() {
        let html = render_record(&person(None, Some("1968-12-10"))).unwrap();
        assert!(!html.contains("1968-12-10"));
    }

    #[test]
    fn test_names_are_escaped() {
        let record = AuthorityRecord {
            id: "T1".into(),
            name: "<script>alert(1)</script>".into(),
            details: AuthorityDetails::Basic,
            raw: json!({}),
        };
        let html = render_record(&record).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_html_buffer_keeps_last_assignment() {
        let buffer = HtmlBuffer::new();
        assert!(buffer.content().is_none());
        buffer.set_content("<p>first</p>".into());
        buffer.set_content("<p>second</p>".into());
        assert_eq!(buffer.content().as_deref(), Some("<p>second</p>"));
    }
}

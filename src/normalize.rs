//! Per-register field mapping.
//!
//! Every register resolves to a [`RegisterProfile`] describing where its
//! display label lives in a remote payload and which API collection holds it.
//! The lookup is a pure function of the register; request data never affects it.

use crate::types::RegisterKind;
use std::borrow::Cow;

/// Label column used when a register has no dedicated mapping
pub const DEFAULT_LABEL_FIELD: &str = "persName_full";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterProfile<'a> {
    pub label_field: &'static str,
    pub api_segment: Cow<'a, str>,
    /// Whether the collection also serves other authority types
    pub mixed_collection: bool,
}

/// Lookup table from register to its mapping. `Other` is the forward-compatible default.
pub fn profile(register: &RegisterKind) -> RegisterProfile<'_> {
    match register {
        RegisterKind::Person | RegisterKind::Organisation => RegisterProfile {
            label_field: DEFAULT_LABEL_FIELD,
            api_segment: Cow::Borrowed("actors"),
            mixed_collection: true,
        },
        RegisterKind::Place => RegisterProfile {
            label_field: "placeName_full",
            api_segment: Cow::Borrowed("places"),
            mixed_collection: false,
        },
        RegisterKind::Term => RegisterProfile {
            label_field: "fullLabel",
            api_segment: Cow::Borrowed("terms"),
            mixed_collection: false,
        },
        RegisterKind::Abbreviation => RegisterProfile {
            label_field: "label",
            api_segment: Cow::Borrowed("abbreviations"),
            mixed_collection: false,
        },
        RegisterKind::Other(name) => RegisterProfile {
            label_field: DEFAULT_LABEL_FIELD,
            api_segment: Cow::Borrowed(name.as_str()),
            mixed_collection: false,
        },
    }
}

/// Name of the JSON field holding the display label for `register`
pub fn label_field(register: &RegisterKind) -> &'static str {
    profile(register).label_field
}

/// API path segment addressing the collection of `register`.
/// An override is returned unchanged.
pub fn api_segment<'a>(register: &'a RegisterKind, api_override: Option<&'a str>) -> Cow<'a, str> {
    match api_override {
        Some(segment) => Cow::Borrowed(segment),
        None => profile(register).api_segment,
    }
}

pub fn mixed_collection(register: &RegisterKind) -> bool {
    profile(register).mixed_collection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_registers() -> Vec<RegisterKind> {
        vec![
            RegisterKind::Person,
            RegisterKind::Organisation,
            RegisterKind::Place,
            RegisterKind::Term,
            RegisterKind::Abbreviation,
            RegisterKind::Other("letters".to_string()),
        ]
    }

    #[test]
    fn test_label_fields() {
        assert_eq!(label_field(&RegisterKind::Place), "placeName_full");
        assert_eq!(label_field(&RegisterKind::Term), "fullLabel");
        assert_eq!(label_field(&RegisterKind::Abbreviation), "label");
        assert_eq!(label_field(&RegisterKind::Person), "persName_full");
        assert_eq!(label_field(&RegisterKind::Organisation), "persName_full");
        assert_eq!(label_field(&RegisterKind::Other("letters".into())), "persName_full");
    }

    #[test]
    fn test_api_segments() {
        assert_eq!(api_segment(&RegisterKind::Person, None), "actors");
        assert_eq!(api_segment(&RegisterKind::Organisation, None), "actors");
        assert_eq!(api_segment(&RegisterKind::Place, None), "places");
        assert_eq!(api_segment(&RegisterKind::Term, None), "terms");
        assert_eq!(api_segment(&RegisterKind::Abbreviation, None), "abbreviations");

        let letters = RegisterKind::Other("letters".into());
        assert_eq!(api_segment(&letters, None), "letters");
    }

    #[test]
    fn test_api_override_wins() {
        assert_eq!(api_segment(&RegisterKind::Place, Some("geo")), "geo");
        assert_eq!(api_segment(&RegisterKind::Person, Some("people")), "people");
    }

    #[test]
    fn test_every_register_maps_to_non_empty_values() {
        for register in all_registers() {
            assert!(!label_field(&register).is_empty(), "{register}");
            assert!(!api_segment(&register, None).is_empty(), "{register}");
        }
    }

    #[test]
    fn test_only_actor_registers_share_a_collection() {
        assert!(mixed_collection(&RegisterKind::Person));
        assert!(mixed_collection(&RegisterKind::Organisation));
        assert!(!mixed_collection(&RegisterKind::Place));
        assert!(!mixed_collection(&RegisterKind::Other("letters".into())));
    }
}

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Shape of a user-supplied resource reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Hyphenated UUID, as used for resource plans and some GUIDs
    Uuid,
    /// Cloud Resource Name (`crn:v1:...`)
    Crn,
    /// VPC-style provider id (`r006-<uuid>` or `0717-<uuid>`)
    ProviderId,
    /// Anything else, most likely a human-assigned name
    Name,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Uuid => "uuid",
            ReferenceKind::Crn => "crn",
            ReferenceKind::ProviderId => "provider-id",
            ReferenceKind::Name => "name",
        }
    }
}

/// Trait for classifying references - allows for different implementations and testing
pub trait ReferenceClassifier {
    fn classify(&self, reference: &str) -> ReferenceKind;
    fn is_valid_uuid(&self, value: &str) -> bool;
}

/// Default classifier for IBM Cloud identifiers
pub struct DefaultReferenceClassifier;

fn provider_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^[0-9a-z]{4}-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
            )
            .ok()
        })
        .as_ref()
}

impl ReferenceClassifier for DefaultReferenceClassifier {
    fn classify(&self, reference: &str) -> ReferenceKind {
        if reference.starts_with("crn:") {
            ReferenceKind::Crn
        } else if self.is_valid_uuid(reference) {
            ReferenceKind::Uuid
        } else if provider_id_pattern().map_or(false, |re| re.is_match(reference)) {
            ReferenceKind::ProviderId
        } else {
            ReferenceKind::Name
        }
    }

    /// Hyphenated UUID only; braced and URN forms are rejected
    fn is_valid_uuid(&self, value: &str) -> bool {
        value.len() == 36 && Uuid::try_parse(value).is_ok()
    }
}

// Convenience functions
pub fn classify_reference(reference: &str) -> ReferenceKind {
    DefaultReferenceClassifier.classify(reference)
}

pub fn is_valid_uuid(value: &str) -> bool {
    DefaultReferenceClassifier.is_valid_uuid(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let classifier = DefaultReferenceClassifier;

        assert_eq!(
            classifier.classify("dc1460a6-37bd-4e2b-8180-d0f86ff39baa"),
            ReferenceKind::Uuid
        );
        assert_eq!(
            classifier.classify("r006-4727d842-f94f-4a2d-824a-9bc9b02c523b"),
            ReferenceKind::ProviderId
        );
        assert_eq!(
            classifier.classify("crn:v1:bluemix:public:dns-svcs:global:a/abc:guid::"),
            ReferenceKind::Crn
        );
        assert_eq!(classifier.classify("my-vpc"), ReferenceKind::Name);
    }

    #[test]
    fn test_uuid_validation() {
        assert!(is_valid_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!is_valid_uuid("{550e8400-e29b-41d4-a716-446655440000}"));
        assert!(!is_valid_uuid("invalid-uuid"));
    }
}

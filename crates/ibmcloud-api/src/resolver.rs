//! Name-or-id resolution.
//!
//! A reference is first looked up by name; only a `not_found` outcome falls
//! back to the id (or guid) lookup. Any other error is returned as-is.

use crate::errors::Result;
use ibmcloud_core::{AmbiguityPolicy, CloudError, Record};
use ibmcloud_utils::classify_reference;
use log::{debug, warn};
use serde_json::Value;
use std::future::Future;

/// Trait for resource collections that can be looked up by name and by id
pub trait ResourceLookup: Sync {
    /// Human-readable resource kind, used in errors and logs
    fn kind(&self) -> &'static str;

    fn get_by_name(&self, name: &str) -> impl Future<Output = Result<Record>> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<Record>> + Send;

    /// Resolve a reference that may be a name or an id
    fn resolve(&self, reference: &str) -> impl Future<Output = Result<Record>> + Send {
        async move {
            with_fallback(
                self.kind(),
                reference,
                self.get_by_name(reference),
                self.get_by_id(reference),
            )
            .await
        }
    }

    /// Resolve a reference and return the record's `id`
    fn resolve_id(&self, reference: &str) -> impl Future<Output = Result<String>> + Send {
        async move {
            let record = self.resolve(reference).await?;
            record_field(&record, "id", self.kind())
        }
    }
}

/// Await `primary`; if it reports `not_found`, await `fallback` instead.
///
/// `fallback` is never polled unless the primary outcome is `not_found`, so
/// passing an unstarted future costs nothing.
pub async fn with_fallback<T, P, F>(kind: &str, reference: &str, primary: P, fallback: F) -> Result<T>
where
    P: Future<Output = Result<T>>,
    F: Future<Output = Result<T>>,
{
    match primary.await {
        Err(err) if err.is_not_found() => {
            debug!(
                "{} '{}' not found by name, retrying as {} id",
                kind,
                reference,
                classify_reference(reference).as_str()
            );
            fallback.await
        }
        outcome => outcome,
    }
}

/// Pick the single record whose `name` equals `name`
///
/// No match is `not_found`. Several matches follow `policy`.
pub fn select_by_name<I>(kind: &str, name: &str, records: I, policy: AmbiguityPolicy) -> Result<Record>
where
    I: IntoIterator<Item = Record>,
{
    let mut matches: Vec<Record> = records
        .into_iter()
        .filter(|record| record.get("name").and_then(Value::as_str) == Some(name))
        .collect();

    match matches.len() {
        0 => Err(CloudError::not_found(kind, name).into()),
        1 => Ok(matches.remove(0)),
        count => match policy {
            AmbiguityPolicy::Reject => {
                warn!("{} name '{}' matches {} resources", kind, name, count);
                Err(CloudError::Ambiguous {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    count,
                }
                .into())
            }
            AmbiguityPolicy::TreatAsNotFound => {
                warn!(
                    "{} name '{}' matches {} resources, reporting not_found",
                    kind, name, count
                );
                Err(CloudError::not_found(kind, name).into())
            }
        },
    }
}

/// Records stored under `field` in a list response
pub fn list_field(body: Record, field: &str) -> Result<Vec<Record>> {
    match body {
        Value::Object(mut map) => match map.remove(field) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(CloudError::InvalidResponse(format!("missing '{}' array", field)).into()),
        },
        _ => Err(CloudError::InvalidResponse("expected a JSON object".to_string()).into()),
    }
}

/// String sub-field of a record, such as `id` or `guid`
pub fn record_field(record: &Record, field: &str, kind: &str) -> Result<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| {
            CloudError::InvalidResponse(format!("{} record has no '{}' field", kind, field)).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use ibmcloud_core::RemoteError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Lookup double with scripted outcomes and call counters
    struct ScriptedLookup {
        by_name: fn(&str) -> Result<Record>,
        by_id: fn(&str) -> Result<Record>,
        name_calls: AtomicUsize,
        id_calls: AtomicUsize,
    }

    impl ScriptedLookup {
        fn new(by_name: fn(&str) -> Result<Record>, by_id: fn(&str) -> Result<Record>) -> Self {
            Self {
                by_name,
                by_id,
                name_calls: AtomicUsize::new(0),
                id_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ResourceLookup for ScriptedLookup {
        fn kind(&self) -> &'static str {
            "VPC"
        }

        async fn get_by_name(&self, name: &str) -> Result<Record> {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            (self.by_name)(name)
        }

        async fn get_by_id(&self, id: &str) -> Result<Record> {
            self.id_calls.fetch_add(1, Ordering::SeqCst);
            (self.by_id)(id)
        }
    }

    fn not_found(reference: &str) -> Result<Record> {
        Err(CloudError::not_found("VPC", reference).into())
    }

    fn found_by_id(id: &str) -> Result<Record> {
        Ok(json!({"name": "my-vpc", "id": id}))
    }

    fn forbidden(_: &str) -> Result<Record> {
        Err(CloudError::Remote(RemoteError::new(403, "forbidden")).into())
    }

    #[tokio::test]
    async fn test_name_hit_skips_id_lookup() {
        let lookup = ScriptedLookup::new(|name| Ok(json!({"name": name, "id": "vpc-123"})), found_by_id);

        let record = lookup.resolve("my-vpc").await.unwrap();
        assert_eq!(record, json!({"name": "my-vpc", "id": "vpc-123"}));
        assert_eq!(lookup.name_calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_found_falls_back_to_id() {
        let lookup = ScriptedLookup::new(not_found, found_by_id);

        let record = lookup.resolve("vpc-123").await.unwrap();
        assert_eq!(record["id"], "vpc-123");
        assert_eq!(lookup.id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_missing_is_not_found() {
        let lookup = ScriptedLookup::new(not_found, not_found);

        let err = lookup.resolve("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(lookup.name_calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_errors_skip_fallback() {
        let lookup = ScriptedLookup::new(forbidden, found_by_id);

        let err = lookup.resolve("my-vpc").await.unwrap_err();
        assert_eq!(err.code(), Some("forbidden"));
        assert_eq!(lookup.id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_errors_propagate() {
        let lookup = ScriptedLookup::new(not_found, forbidden);

        let err = lookup.resolve("vpc-123").await.unwrap_err();
        assert_eq!(err.code(), Some("forbidden"));
    }

    #[tokio::test]
    async fn test_resolve_id() {
        let lookup = ScriptedLookup::new(not_found, found_by_id);
        assert_eq!(lookup.resolve_id("vpc-9").await.unwrap(), "vpc-9");
    }

    #[test]
    fn test_select_by_name() {
        let records = || {
            vec![
                json!({"name": "a", "id": "1"}),
                json!({"name": "b", "id": "2"}),
                json!({"name": "b", "id": "3"}),
            ]
        };

        let record = select_by_name("VPC", "a", records(), AmbiguityPolicy::Reject).unwrap();
        assert_eq!(record["id"], "1");

        let err = select_by_name("VPC", "zzz", records(), AmbiguityPolicy::Reject).unwrap_err();
        assert!(err.is_not_found());

        let err = select_by_name("VPC", "b", records(), AmbiguityPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Cloud(CloudError::Ambiguous { count: 2, .. })
        ));

        let err = select_by_name("VPC", "b", records(), AmbiguityPolicy::TreatAsNotFound).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_field() {
        let items = list_field(json!({"vpcs": [{"id": "1"}]}), "vpcs").unwrap();
        assert_eq!(items.len(), 1);

        assert!(list_field(json!({"other": []}), "vpcs").is_err());
        assert!(list_field(json!([]), "vpcs").is_err());
    }
}

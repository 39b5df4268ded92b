//! Integration tests for the resolver against an in-memory collaborator.

use async_trait::async_trait;
use linode_identity::prelude::*;
use linode_identity::{LookupRecord, MemoryObserver};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: i64,
    label: String,
}

impl Record {
    fn new(id: i64, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
enum FakeError {
    #[error("401 Unauthorized: invalid token")]
    Unauthorized,
    #[error("429 Too Many Requests")]
    RateLimited,
}

/// Collaborator backed by a fixed instance set that honours label filters.
#[derive(Default)]
struct FakeLinode {
    instances: Vec<Record>,
    failure: Option<FakeError>,
    delay: Option<Duration>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    filters: Mutex<Vec<ListOptions>>,
}

impl FakeLinode {
    fn with(instances: Vec<Record>) -> Self {
        Self {
            instances,
            ..Default::default()
        }
    }

    fn failing(failure: FakeError) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    fn calls(&self) -> (usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.get_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl InstanceApi for FakeLinode {
    type Instance = Record;
    type Error = FakeError;

    async fn list_instances(&self, options: &ListOptions) -> Result<Vec<Record>, FakeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(options.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let label = options
            .filter
            .as_deref()
            .and_then(|f| serde_json::from_str::<Value>(f).ok())
            .and_then(|f| f["label"].as_str().map(str::to_string));

        Ok(self
            .instances
            .iter()
            .filter(|r| label.as_deref().is_none_or(|l| r.label == l))
            .cloned()
            .collect())
    }

    async fn get_instance(&self, id: i64) -> Result<Option<Record>, FakeError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.instances.iter().find(|r| r.id == id).cloned())
    }
}

fn cluster() -> Arc<FakeLinode> {
    Arc::new(FakeLinode::with(vec![
        Record::new(1, "node-1"),
        Record::new(2, "node-2"),
        Record::new(3, "dup"),
        Record::new(4, "dup"),
    ]))
}

#[tokio::test]
async fn test_resolve_by_name_single_match() {
    let api = cluster();
    let resolver = Resolver::new(Arc::clone(&api));

    let instance = resolver.resolve_by_name("node-2").await.unwrap();
    assert_eq!(instance, Record::new(2, "node-2"));
    assert_eq!(api.calls(), (1, 0));
}

#[tokio::test]
async fn test_resolve_by_name_is_exact() {
    let resolver = Resolver::new(cluster());

    for name in ["node", "node-", "Node-1", " node-1", "node-1 ", "node-*"] {
        let err = resolver.resolve_by_name(name).await.unwrap_err();
        assert!(err.is_instance_not_found(), "{name:?} should not match");
    }
}

#[tokio::test]
async fn test_resolve_by_name_not_found() {
    let api = Arc::new(FakeLinode::default());
    let resolver = Resolver::new(Arc::clone(&api));

    let err = resolver.resolve_by_name("node-1").await.unwrap_err();
    assert!(matches!(err, Error::InstanceNotFound));
    assert_eq!(err.to_string(), "instance not found");
    assert_eq!(api.calls(), (1, 0));
}

#[tokio::test]
async fn test_resolve_by_name_ambiguous() {
    let resolver = Resolver::new(cluster());

    let err = resolver.resolve_by_name("dup").await.unwrap_err();
    assert!(matches!(err, Error::AmbiguousInstance(ref name) if name == "dup"));
    assert!(!err.is_instance_not_found());
    assert_eq!(err.to_string(), "multiple instances found with name dup");
}

#[tokio::test]
async fn test_resolve_by_name_sends_unbounded_label_filter() {
    let api = cluster();
    let resolver = Resolver::new(Arc::clone(&api));
    let _ = resolver.resolve_by_name("node-\"1\"").await;

    let filters = api.filters.lock().unwrap();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].page_size, 0);
    let filter: Value = serde_json::from_str(filters[0].filter.as_deref().unwrap()).unwrap();
    assert_eq!(filter, serde_json::json!({ "label": "node-\"1\"" }));
}

#[tokio::test]
async fn test_resolve_by_id() {
    let api = cluster();
    let resolver = Resolver::new(Arc::clone(&api));

    assert_eq!(resolver.resolve_by_id(1).await.unwrap(), Record::new(1, "node-1"));

    let err = resolver.resolve_by_id(99).await.unwrap_err();
    assert!(matches!(err, Error::NotFoundById(99)));
    assert!(!err.is_instance_not_found());
    assert_eq!(err.to_string(), "instance not found with id 99");
    assert_eq!(api.calls(), (0, 2));
}

#[tokio::test]
async fn test_collaborator_errors_pass_through_unchanged() {
    for failure in [FakeError::Unauthorized, FakeError::RateLimited] {
        let resolver = Resolver::new(FakeLinode::failing(failure.clone()));

        let by_name = resolver.resolve_by_name("node-1").await.unwrap_err();
        assert_eq!(by_name.to_string(), failure.to_string());
        assert_eq!(by_name.into_api_error(), Some(failure.clone()));

        let by_id = resolver.resolve_by_id(1).await.unwrap_err();
        assert_eq!(by_id.to_string(), failure.to_string());
        assert_eq!(by_id.api_error(), Some(&failure));

        assert_eq!(resolver.api().calls(), (1, 1));
    }
}

#[tokio::test]
async fn test_resolve_by_provider_id() {
    let api = cluster();
    let resolver = Resolver::new(Arc::clone(&api));

    let instance = resolver.resolve_by_provider_id("linode://2").await.unwrap();
    assert_eq!(instance.label, "node-2");

    let err = resolver.resolve_by_provider_id("linode://77").await.unwrap_err();
    assert!(matches!(err, Error::NotFoundById(77)));

    let err = resolver.resolve_by_provider_id("aws://2").await.unwrap_err();
    assert!(
        matches!(err, Error::InvalidProviderId(ref invalid) if invalid.value() == "aws://2")
    );
    assert_eq!(api.calls(), (0, 2));
}

#[tokio::test]
async fn test_one_observation_per_lookup() {
    let observer = Arc::new(MemoryObserver::new());
    let failing = Resolver::new(FakeLinode::failing(FakeError::RateLimited))
        .with_observer(Arc::clone(&observer));

    let _ = failing.resolve_by_name("node-1").await;
    let _ = failing.resolve_by_id(9).await;
    let _ = failing.resolve_by_provider_id("linode://x").await;

    let resolver = Resolver::new(cluster()).with_observer(Arc::clone(&observer));
    let _ = resolver.resolve_by_name("dup").await;
    let _ = resolver.resolve_by_provider_id("linode://1").await;

    assert_eq!(
        observer.lookups(),
        vec![
            LookupRecord::ByName("node-1".to_string()),
            LookupRecord::ById(9),
            LookupRecord::ByName("dup".to_string()),
            LookupRecord::ById(1),
        ]
    );
}

#[tokio::test]
async fn test_concurrent_lookups_are_independent() {
    let resolver = Resolver::new(cluster());

    let names = ["node-1", "node-2", "dup", "missing"];
    let results = futures::future::join_all(names.iter().map(|n| resolver.resolve_by_name(n))).await;

    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert_eq!(results[1].as_ref().unwrap().id, 2);
    assert!(matches!(results[2], Err(Error::AmbiguousInstance(_))));
    assert!(matches!(results[3], Err(Error::InstanceNotFound)));
    assert_eq!(resolver.api().calls(), (4, 0));
}

#[tokio::test]
async fn test_caller_timeout_cancels_lookup() {
    let api = FakeLinode {
        delay: Some(Duration::from_secs(60)),
        ..FakeLinode::with(vec![Record::new(1, "node-1")])
    };
    let resolver = Resolver::new(api);

    let outcome =
        tokio::time::timeout(Duration::from_millis(10), resolver.resolve_by_name("node-1")).await;
    assert!(outcome.is_err());
    assert_eq!(resolver.api().calls(), (1, 0));
}

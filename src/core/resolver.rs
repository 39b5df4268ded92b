use std::sync::Arc;

use crate::core::api::{InstanceApi, ListOptions};
use crate::core::error::Error;
use crate::core::observer::{LogObserver, Lookup, LookupObserver};
use crate::core::provider_id;

/// Result of a resolver lookup against collaborator `A`.
pub type ResolveResult<A> =
    Result<<A as InstanceApi>::Instance, Error<<A as InstanceApi>::Error>>;

/// Maps node identities onto instance records.
///
/// Every lookup issues exactly one collaborator call and keeps nothing
/// between calls. Collaborator errors are returned as [`Error::Api`] without
/// retry or rewording.
pub struct Resolver<A> {
    api: A,
    observer: Arc<dyn LookupObserver>,
}

impl<A: Clone> Clone for Resolver<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<A: InstanceApi> Resolver<A> {
    /// Creates a resolver that reports lookups through [`LogObserver`].
    pub fn new(api: A) -> Self {
        Self {
            api,
            observer: Arc::new(LogObserver),
        }
    }

    /// Replaces the lookup observer.
    pub fn with_observer(mut self, observer: impl LookupObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Finds the single instance labelled `node_name`.
    ///
    /// # Errors
    /// * [`Error::InstanceNotFound`] when no instance carries the label
    /// * [`Error::AmbiguousInstance`] when more than one does
    /// * [`Error::Api`] when the list call fails
    pub async fn resolve_by_name(&self, node_name: &str) -> ResolveResult<A> {
        self.observer.on_lookup(&Lookup::ByName(node_name));

        let mut instances = self
            .api
            .list_instances(&ListOptions::label_filter(node_name))
            .await
            .map_err(Error::Api)?;

        if instances.len() > 1 {
            return Err(Error::AmbiguousInstance(node_name.to_string()));
        }
        instances.pop().ok_or(Error::InstanceNotFound)
    }

    /// Fetches the instance with the given ID.
    ///
    /// # Errors
    /// * [`Error::NotFoundById`] when the API reports the ID absent
    /// * [`Error::Api`] when the get call fails
    pub async fn resolve_by_id(&self, id: i64) -> ResolveResult<A> {
        self.observer.on_lookup(&Lookup::ById(id));

        self.api
            .get_instance(id)
            .await
            .map_err(Error::Api)?
            .ok_or(Error::NotFoundById(id))
    }

    /// Parses `provider_id` and fetches the instance it names.
    ///
    /// A malformed provider ID fails with [`Error::InvalidProviderId`]
    /// before the API is called.
    pub async fn resolve_by_provider_id(&self, provider_id: &str) -> ResolveResult<A> {
        let id = provider_id::parse(provider_id)?;
        self.resolve_by_id(id).await
    }
}

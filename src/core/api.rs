use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

/// Paging and filtering options for a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Requested page size. `0` leaves the page size to the API and asks the
    /// client to enumerate every page.
    pub page_size: u32,
    /// Raw JSON filter, sent to the API untouched.
    pub filter: Option<String>,
}

impl ListOptions {
    pub fn new(page_size: u32, filter: impl Into<String>) -> Self {
        Self {
            page_size,
            filter: Some(filter.into()),
        }
    }

    /// Options matching instances whose label equals `label` exactly.
    pub fn label_filter(label: &str) -> Self {
        Self::new(0, json!({ "label": label }).to_string())
    }
}

/// The slice of the provider API the resolver depends on.
///
/// Implementations own transport, authentication and retries. `Instance` is
/// opaque to the resolver and handed back to the caller untouched.
#[async_trait]
pub trait InstanceApi: Send + Sync {
    type Instance: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists every instance matching `options`.
    async fn list_instances(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<Self::Instance>, Self::Error>;

    /// Fetches one instance. `Ok(None)` means the API reported it absent.
    async fn get_instance(&self, id: i64) -> Result<Option<Self::Instance>, Self::Error>;
}

#[async_trait]
impl<T: InstanceApi + ?Sized> InstanceApi for &T {
    type Instance = T::Instance;
    type Error = T::Error;

    async fn list_instances(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<Self::Instance>, Self::Error> {
        (**self).list_instances(options).await
    }

    async fn get_instance(&self, id: i64) -> Result<Option<Self::Instance>, Self::Error> {
        (**self).get_instance(id).await
    }
}

#[async_trait]
impl<T: InstanceApi + ?Sized> InstanceApi for Arc<T> {
    type Instance = T::Instance;
    type Error = T::Error;

    async fn list_instances(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<Self::Instance>, Self::Error> {
        (**self).list_instances(options).await
    }

    async fn get_instance(&self, id: i64) -> Result<Option<Self::Instance>, Self::Error> {
        (**self).get_instance(id).await
    }
}

#[async_trait]
impl<T: InstanceApi + ?Sized> InstanceApi for Box<T> {
    type Instance = T::Instance;
    type Error = T::Error;

    async fn list_instances(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<Self::Instance>, Self::Error> {
        (**self).list_instances(options).await
    }

    async fn get_instance(&self, id: i64) -> Result<Option<Self::Instance>, Self::Error> {
        (**self).get_instance(id).await
    }
}

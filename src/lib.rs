//! # linode-identity
//!
//! Resolves a cluster node's identity (its name, or a `linode://<id>`
//! provider ID) to the Linode instance backing it.
//!
//! ## Features
//!
//! - **Provider ID codec**: strict parsing of `linode://<id>` strings
//! - **Instance resolver**: by-name and by-ID lookups with distinct
//!   not-found, ambiguity and upstream-failure outcomes
//! - **Pluggable collaborator**: any type implementing [`InstanceApi`] can back the resolver
//! - **Optional Linode client**: a `reqwest` implementation of [`InstanceApi`] (feature `api`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linode_identity::prelude::*;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("offline")]
//! struct Offline;
//!
//! struct Fixed;
//!
//! #[async_trait::async_trait]
//! impl InstanceApi for Fixed {
//!     type Instance = String;
//!     type Error = Offline;
//!
//!     async fn list_instances(&self, _options: &ListOptions) -> Result<Vec<String>, Offline> {
//!         Ok(vec!["node-1".to_string()])
//!     }
//!
//!     async fn get_instance(&self, _id: i64) -> Result<Option<String>, Offline> {
//!         Ok(None)
//!     }
//! }
//!
//! # async fn run() -> Result<(), Error<Offline>> {
//! let resolver = Resolver::new(Fixed);
//! let instance = resolver.resolve_by_name("node-1").await?;
//! assert_eq!(instance, "node-1");
//!
//! let id = provider_id::parse("linode://42")?;
//! assert!(matches!(resolver.resolve_by_id(id).await, Err(Error::NotFoundById(42))));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`provider_id`]: Provider ID parsing and formatting
//! - [`prelude`]: Commonly used types and traits (import with `use linode_identity::prelude::*`)
//! - `linode`: The Linode HTTP client (feature `api`)

// ============================================================================
// Core Module
// ============================================================================

mod core;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

pub use crate::core::provider_id;
pub use crate::core::provider_id::{InvalidProviderId, PROVIDER_ID_PREFIX};

pub use crate::core::api::{InstanceApi, ListOptions};
pub use crate::core::error::Error;
pub use crate::core::observer::{
    LogObserver, Lookup, LookupObserver, LookupRecord, MemoryObserver, NoopObserver,
};
pub use crate::core::resolver::{ResolveResult, Resolver};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// Imports everything needed to resolve instances.
///
/// # Example
/// ```rust
/// use linode_identity::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        Error, InstanceApi, InvalidProviderId, ListOptions, LogObserver, Lookup, LookupObserver,
        Resolver, provider_id,
    };
}

// ============================================================================
// Linode API Feature
// ============================================================================

#[cfg(feature = "api")]
pub mod linode;

#[cfg(feature = "api")]
pub use linode::{ApiError, ClientConfig, Instance, InstanceStatus, LinodeClient};

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");

use thiserror::Error;

use crate::core::provider_id::InvalidProviderId;

/// Failure of a resolver lookup.
///
/// `E` is the collaborator's own error type; [`Error::Api`] carries it
/// unchanged, with the same message and source chain.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error(transparent)]
    InvalidProviderId(#[from] InvalidProviderId),

    /// No instance carries the requested label.
    #[error("instance not found")]
    InstanceNotFound,

    /// More than one instance carries the requested label.
    #[error("multiple instances found with name {0}")]
    AmbiguousInstance(String),

    /// The API reported the requested ID as absent.
    #[error("instance not found with id {0}")]
    NotFoundById(i64),

    #[error(transparent)]
    Api(E),
}

impl<E> Error<E> {
    /// True for the label lookup sentinel, which callers use to decide that
    /// a node's backing instance no longer exists.
    pub fn is_instance_not_found(&self) -> bool {
        matches!(self, Error::InstanceNotFound)
    }

    pub fn api_error(&self) -> Option<&E> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_api_error(self) -> Option<E> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

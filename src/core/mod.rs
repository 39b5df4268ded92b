pub mod api;
pub mod error;
pub mod observer;
pub mod provider_id;
pub mod resolver;

//! Web front end: the classification page, its insights variant, and a JSON API.

pub mod api;
mod charts;
mod handlers;
mod page;
pub mod routes;

#[cfg(feature = "client")]
pub mod client;

pub use api::{ApiError, ClassifyRequest, ClassifyResponse};
pub use routes::{AppState, PageOptions, ServerConfig, create_router, serve};

#[cfg(feature = "client")]
pub use client::{ApiClient, ClientError};

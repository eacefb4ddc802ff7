//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, rooted JSON bodies
//! - `modules`: handlers per resource plus request-id and metrics middleware
//! - `router`: route table, OpenAPI document and layers

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};

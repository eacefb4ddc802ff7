//! Shared HTTP building blocks

pub mod json_body;
pub mod response;

pub use json_body::{RootKey, RootedJson, RootedJsonRejection};
pub use response::{ApiError, ApiResponse, FiltersMeta, PaginationMeta, ResponseStatus};

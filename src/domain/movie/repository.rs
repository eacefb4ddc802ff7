//! Movie store interface

use async_trait::async_trait;

use super::model::{Movie, ValidMovie};
use super::query::ListQuery;
use crate::shared::{DomainResult, PaginatedResult};

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Filtered page ordered by `created_at` DESC. `total_count` honours the
    /// filters and ignores pagination.
    async fn list(&self, query: &ListQuery) -> DomainResult<PaginatedResult<Movie>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Movie>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn create(&self, movie: ValidMovie) -> DomainResult<Movie>;
    /// Overwrite every field of an existing record. `NotFound` if it vanished.
    async fn update(&self, id: i32, movie: ValidMovie) -> DomainResult<Movie>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
    /// Atomically replace every record with `movies`. On failure the
    /// previous contents are kept. Returns the number of inserted rows.
    async fn replace_all(&self, movies: Vec<ValidMovie>) -> DomainResult<u64>;
}

//! Movie catalog service - application-layer orchestration
//!
//! HTTP handlers stay thin and delegate here. Every write goes through
//! [`MovieDraft::validated`] before it reaches the repository.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::movie::{
    current_year, AppliedFilters, ListParams, ListQuery, Movie, MovieDraft, MoviePatch,
    MovieRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::shared::PaginatedResult;

/// One page of movies plus the filters that shaped it.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub result: PaginatedResult<Movie>,
    pub filters: AppliedFilters,
}

/// Movie service. Generic over `R: MovieRepository` so it stays decoupled
/// from the concrete persistence layer.
pub struct MovieService<R: MovieRepository> {
    repo: Arc<R>,
}

impl<R: MovieRepository> MovieService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Never fails on bad input: pagination is clamped and unusable filters
    /// are dropped before the store sees them.
    pub async fn list(&self, params: &ListParams) -> DomainResult<MoviePage> {
        let query = ListQuery::from_params(params, current_year());
        debug!("Listing movies: {:?}", query);

        let result = self.repo.list(&query).await?;
        Ok(MoviePage {
            result,
            filters: query.applied(),
        })
    }

    /// `raw_id` is the path segment as received; anything that is not a
    /// known id is reported as not found, echoing the raw value.
    pub async fn get(&self, raw_id: &str) -> DomainResult<Movie> {
        let id = parse_id(raw_id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::movie_not_found(raw_id))
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, patch: MoviePatch) -> DomainResult<Movie> {
        let movie = patch
            .apply_to(MovieDraft::default())
            .validated(current_year())
            .map_err(DomainError::Validation)?;

        let created = self.repo.create(movie).await?;
        record_mutation("create");
        info!("Movie created: {} ({})", created.title, created.id);
        Ok(created)
    }

    /// Load, apply the patch, validate the whole record, then write. A
    /// validation failure leaves the stored record untouched.
    pub async fn update(&self, raw_id: &str, patch: MoviePatch) -> DomainResult<Movie> {
        let current = self.get(raw_id).await?;
        let id = current.id;

        let movie = patch
            .apply_to(MovieDraft::from(current))
            .validated(current_year())
            .map_err(DomainError::Validation)?;

        let updated = self.repo.update(id, movie).await.map_err(|e| match e {
            DomainError::NotFound { .. } => DomainError::movie_not_found(raw_id),
            other => other,
        })?;
        record_mutation("update");
        info!("Movie updated: {} ({})", updated.title, updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> DomainResult<()> {
        let id = parse_id(raw_id)?;
        self.repo.delete(id).await.map_err(|e| match e {
            DomainError::NotFound { .. } => DomainError::movie_not_found(raw_id),
            other => other,
        })?;
        record_mutation("delete");
        info!("Movie deleted: {}", id);
        Ok(())
    }
}

fn parse_id(raw: &str) -> DomainResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::movie_not_found(raw))
}

fn record_mutation(operation: &'static str) {
    metrics::counter!("movies_mutations_total", "operation" => operation).increment(1);
}

// ── Tests ──────────────────────────────────────────────────────

//! Movie aggregate
//!
//! Contains the Movie entity, write-side drafts and validation, the list
//! query model, and the repository interface.

pub mod model;
pub mod query;
pub mod repository;

pub use model::{
    current_year, max_year, Movie, MovieDraft, MoviePatch, ValidMovie, MAX_YEARS_AHEAD, MIN_YEAR,
};
pub use query::{AppliedFilters, ListParams, ListQuery, MovieFilter};
pub use repository::MovieRepository;

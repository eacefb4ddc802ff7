pub mod movie;

// Re-export commonly used types
pub use movie::{
    AppliedFilters, ListParams, ListQuery, Movie, MovieDraft, MovieFilter, MoviePatch,
    MovieRepository, ValidMovie,
};

// Re-export errors from shared for convenience
pub use crate::shared::{DomainError, DomainResult, FieldErrors};

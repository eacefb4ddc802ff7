//! Application layer - use-case orchestration

pub mod movies;

pub use movies::{MoviePage, MovieService};

pub mod service;

pub use service::{MoviePage, MovieService};

//! Database entities module

pub mod movie;

pub use movie::Entity as Movie;

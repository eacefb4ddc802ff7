pub mod health;
pub mod index;
pub mod metrics;
pub mod movies;
pub mod request_id;

//! coursecat - Course Catalog Storage
//!
//! SQLite-backed catalog that supplies candidate pools to the similarity engine

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Storage and retrieval of courses.
pub mod courses;
/// Catalog error types.
pub mod error;
/// Database schema and connection management.
pub mod schema;
/// Catalog seeding from JSON files.
pub mod seed;

pub use courses::CourseStore;
pub use error::{CatalogError, CatalogResult};
pub use schema::{Catalog, CatalogConfig};
pub use seed::{load_seed_file, seed_from_file};

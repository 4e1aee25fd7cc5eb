// Catalog seeding from JSON

use crate::courses::CourseStore;
use crate::error::{CatalogError, CatalogResult};
use crate::schema::Catalog;
use coursimil::Course;
use std::path::Path;
use tracing::info;

/// Read a JSON array of courses (camelCase fields) from `path`
pub fn load_seed_file(path: &Path) -> CatalogResult<Vec<Course>> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Upsert every course in the seed file at `path` into `catalog`
///
/// Returns the number of courses written.
pub fn seed_from_file(catalog: &mut Catalog, path: &Path) -> CatalogResult<usize> {
    let courses = load_seed_file(path)?;
    let written = CourseStore::new(catalog).batch_upsert(&courses)?;
    info!("Seeded {} courses from {}", written, path.display());
    Ok(written)
}

//! Archetype catalog loader.

use std::path::Path;

use crate::archetypes::{Archetype, ArchetypeCatalog};
use crate::loaders::{LoadResult, read_file};

/// Loader for enemy archetypes from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load an archetype catalog from a RON file.
    ///
    /// RON format: `Vec<(String, Archetype)>`, keyed by identifier.
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        let raw: Vec<(String, Archetype)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype catalog RON: {}", e))?;

        for (key, archetype) in &raw {
            if archetype.hit_points == 0 {
                anyhow::bail!("Archetype '{}' must have positive hit points", key);
            }
        }

        Ok(raw.into_iter().collect())
    }

    /// Loads `path` on top of the built-in catalog, overriding matching keys.
    pub fn load_extending_builtin(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let mut catalog = ArchetypeCatalog::builtin();
        for (key, archetype) in Self::load(path)?.iter() {
            catalog.insert(key, archetype.clone());
        }
        Ok(catalog)
    }
}

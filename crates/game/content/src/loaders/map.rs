//! Arena layout loader.
//!
//! Layout files are RON:
//!
//! ```text
//! (
//!     tiles: [
//!         "#####",
//!         "#@.b#",
//!         "#####",
//!     ],
//!     legend: { 'b': "bat" },
//! )
//! ```
//!
//! `legend` may be omitted to use the default glyphs. Plain `.txt` files are
//! read as a bare grid.

use std::path::Path;

use crate::layout::ArenaLayout;
use crate::loaders::{LoadResult, read_file};

/// Loader for arena layouts.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<ArenaLayout> {
        let content = read_file(path)?;
        if path.extension().is_some_and(|ext| ext == "txt") {
            return Ok(ArenaLayout::parse(&content));
        }

        let layout: ArenaLayout = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        if layout.tiles.is_empty() {
            anyhow::bail!("Map {} has no tiles", path.display());
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_ron_layout_with_custom_legend() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(
            file,
            r######"(tiles: ["#####", "#@.x#", "#####"], legend: {{ 'x': "orc" }})"######
        )
        .unwrap();

        let layout = MapLoader::load(file.path()).unwrap();
        assert_eq!(layout.height(), 3);
        assert_eq!(layout.legend.get(&'x').map(String::as_str), Some("orc"));
        assert!(!layout.legend.contains_key(&'b'));
    }

    #[test]
    fn legend_defaults_when_omitted() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(file, r#"(tiles: ["@.b"])"#).unwrap();

        let layout = MapLoader::load(file.path()).unwrap();
        assert_eq!(layout.legend.get(&'b').map(String::as_str), Some("bat"));
    }

    #[test]
    fn loads_plain_text_grid() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "###\n#@#\n###").unwrap();

        let layout = MapLoader::load(file.path()).unwrap();
        assert_eq!((layout.width(), layout.height()), (3, 3));
    }

    #[test]
    fn empty_tiles_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(file, "(tiles: [])").unwrap();
        assert!(MapLoader::load(file.path()).is_err());
    }
}

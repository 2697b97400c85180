//! Named sprites: the bird frames, the tree, and the menu bitmaps.
//!
//! Sprites are ASCII art with a size in logical units; the renderer stretches
//! the art over whatever cells that size covers. A built-in catalog ships with
//! the game and a JSON asset pack may replace or add entries. Every required
//! key must resolve before the game starts.

use crate::constants::{
    BIRD_FRAME_KEYS, LOGO_KEY, MAX_SPRITE_EXTENT, RESTART_KEY, START_BUTTON_KEY, TREE_KEY,
};
use crate::game::types::{Size, SpriteMetrics};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Asset resolution failures. All are fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing sprite `{key}`")]
    Missing { key: String },
    #[error("sprite `{key}` is invalid: {reason}")]
    Invalid { key: String, reason: String },
    #[error("failed to read asset pack {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid asset pack {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Catalog entry as stored in an asset pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDef {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_color")]
    pub color: String,
    pub art: Vec<String>,
}

fn default_color() -> String {
    "white".to_string()
}

impl SpriteDef {
    fn new(width: f64, height: f64, color: &str, art: &[&str]) -> Self {
        Self {
            width,
            height,
            color: color.to_string(),
            art: art.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Sprites by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub sprites: BTreeMap<String, SpriteDef>,
}

impl AssetCatalog {
    /// The sprites bundled with the game.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert(
            BIRD_FRAME_KEYS[0],
            SpriteDef::new(34.0, 24.0, "yellow", &[" /\\  ", "(__o>"]),
        );
        catalog.insert(
            BIRD_FRAME_KEYS[1],
            SpriteDef::new(34.0, 24.0, "yellow", &["     ", "(==o>"]),
        );
        catalog.insert(
            BIRD_FRAME_KEYS[2],
            SpriteDef::new(34.0, 24.0, "yellow", &["(__o>", " \\/  "]),
        );
        catalog.insert(TREE_KEY, SpriteDef::new(80.0, 300.0, "green", &TREE_ART));
        catalog.insert(
            START_BUTTON_KEY,
            SpriteDef::new(
                120.0,
                50.0,
                "cyan",
                &["+----------------+", "|     START      |", "+----------------+"],
            ),
        );
        catalog.insert(
            RESTART_KEY,
            SpriteDef::new(
                120.0,
                50.0,
                "lightred",
                &["+----------------+", "|    RESTART     |", "+----------------+"],
            ),
        );
        catalog.insert(LOGO_KEY, SpriteDef::new(128.0, 128.0, "magenta", &LOGO_ART));
        catalog
    }

    /// Parse an asset pack document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load an asset pack file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn insert(&mut self, key: &str, sprite: SpriteDef) {
        self.sprites.insert(key.to_string(), sprite);
    }

    pub fn remove(&mut self, key: &str) -> Option<SpriteDef> {
        self.sprites.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&SpriteDef> {
        self.sprites.get(key)
    }

    /// Entries from `other` replace same-named entries here.
    pub fn merge(&mut self, other: AssetCatalog) {
        self.sprites.extend(other.sprites);
    }

    /// Look up and validate one sprite.
    pub fn resolve(&self, key: &str) -> Result<Sprite, AssetError> {
        let def = self.get(key).ok_or_else(|| AssetError::Missing {
            key: key.to_string(),
        })?;
        Sprite::from_def(key, def)
    }
}

const TREE_ART: [&str; 20] = [
    "   .####.   ",
    " .########. ",
    "############",
    "############",
    " '########' ",
    "   '####'   ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "    |##|    ",
    "   /|##|\\   ",
    "  //|##|\\\\  ",
];

const LOGO_ART: [&str; 8] = [
    "     __     __      ",
    "  .-'  '-.-'  '-.   ",
    " (               )  ",
    " (    SOARING    )  ",
    "  '-.         .-'   ",
    "     '-.   .-'      ",
    "        '.'         ",
    "         V          ",
];

/// A validated sprite ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub key: String,
    pub size: Size,
    pub color: Color,
    pub art: Vec<String>,
}

impl Sprite {
    fn from_def(key: &str, def: &SpriteDef) -> Result<Self, AssetError> {
        let invalid = |reason: String| AssetError::Invalid {
            key: key.to_string(),
            reason,
        };

        for (side, value) in [("width", def.width), ("height", def.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", side, value)));
            }
            if value > MAX_SPRITE_EXTENT {
                return Err(invalid(format!(
                    "{} must not exceed {}, got {}",
                    side, MAX_SPRITE_EXTENT, value
                )));
            }
        }
        if def.art.iter().all(|line| line.trim().is_empty()) {
            return Err(invalid("art is empty".to_string()));
        }
        let color = Color::from_str(&def.color)
            .map_err(|_| invalid(format!("unknown color '{}'", def.color)))?;

        Ok(Self {
            key: key.to_string(),
            size: Size::new(def.width, def.height),
            color,
            art: def.art.clone(),
        })
    }
}

/// Everything the game draws, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub bird_frames: Vec<Sprite>,
    pub tree: Sprite,
    pub restart: Sprite,
    pub start_button: Sprite,
    pub logo: Sprite,
}

impl Assets {
    /// Resolve every required key, failing on the first missing or invalid one.
    pub fn resolve(catalog: &AssetCatalog) -> Result<Self, AssetError> {
        let bird_frames = BIRD_FRAME_KEYS
            .iter()
            .map(|key| catalog.resolve(key))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bird_frames,
            tree: catalog.resolve(TREE_KEY)?,
            restart: catalog.resolve(RESTART_KEY)?,
            start_button: catalog.resolve(START_BUTTON_KEY)?,
            logo: catalog.resolve(LOGO_KEY)?,
        })
    }

    /// Built-in sprites.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::resolve(&AssetCatalog::builtin())
    }

    /// Sizes the simulation needs for hit-testing.
    pub fn metrics(&self) -> SpriteMetrics {
        SpriteMetrics {
            bird_frames: self.bird_frames.iter().map(|s| s.size).collect(),
            tree: self.tree.size,
        }
    }

    /// Bird sprite for an animation frame index.
    pub fn bird_frame(&self, frame: usize) -> &Sprite {
        &self.bird_frames[frame % self.bird_frames.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_resolves() {
        let assets = Assets::builtin().unwrap();
        assert_eq!(assets.bird_frames.len(), 3);
        assert_eq!(assets.tree.size, Size::new(80.0, 300.0));
        assert_eq!(assets.tree.color, Color::Green);
        assert_eq!(assets.bird_frames[0].key, "bird1");
    }

    #[test]
    fn test_builtin_art_rows_share_width() {
        let catalog = AssetCatalog::builtin();
        for (key, def) in &catalog.sprites {
            let width = def.art[0].chars().count();
            for line in &def.art {
                assert_eq!(line.chars().count(), width, "ragged art in {}", key);
            }
        }
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut catalog = AssetCatalog::builtin();
        catalog.remove("tree");
        match Assets::resolve(&catalog) {
            Err(AssetError::Missing { key }) => assert_eq!(key, "tree"),
            other => panic!("expected missing tree, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_bird_frame_is_fatal() {
        let mut catalog = AssetCatalog::builtin();
        catalog.remove("bird2");
        let err = Assets::resolve(&catalog).unwrap_err();
        assert_eq!(err.to_string(), "missing sprite `bird2`");
    }

    #[test]
    fn test_invalid_sprites_rejected() {
        let mut catalog = AssetCatalog::builtin();
        catalog.insert("logo", SpriteDef::new(0.0, 10.0, "white", &["x"]));
        assert!(matches!(
            Assets::resolve(&catalog),
            Err(AssetError::Invalid { .. })
        ));

        let mut catalog = AssetCatalog::builtin();
        catalog.insert("logo", SpriteDef::new(10.0, 10.0, "white", &["   "]));
        assert!(matches!(
            Assets::resolve(&catalog),
            Err(AssetError::Invalid { .. })
        ));

        let mut catalog = AssetCatalog::builtin();
        catalog.insert("logo", SpriteDef::new(10.0, 10.0, "not-a-color", &["x"]));
        assert!(matches!(
            Assets::resolve(&catalog),
            Err(AssetError::Invalid { .. })
        ));
    }

    #[test]
    fn test_oversized_sprite_rejected() {
        let pack = AssetCatalog::from_json(
            r#"{ "sprites": { "tree": { "width": 1e9, "height": 200, "art": ["|"] } } }"#,
        )
        .unwrap();
        let mut catalog = AssetCatalog::builtin();
        catalog.merge(pack);
        let err = Assets::resolve(&catalog).unwrap_err();
        assert!(matches!(err, AssetError::Invalid { ref key, .. } if key == "tree"));
        assert!(err.to_string().contains("width must not exceed"));

        let mut catalog = AssetCatalog::builtin();
        catalog.insert(
            "tree",
            SpriteDef::new(80.0, MAX_SPRITE_EXTENT, "green", &["|"]),
        );
        assert!(Assets::resolve(&catalog).is_ok());
        catalog.insert(
            "tree",
            SpriteDef::new(80.0, MAX_SPRITE_EXTENT + 1.0, "green", &["|"]),
        );
        assert!(Assets::resolve(&catalog).is_err());
    }

    #[test]
    fn test_asset_pack_overrides_builtin() {
        let pack = AssetCatalog::from_json(
            r#"{ "sprites": { "tree": { "width": 60, "height": 200, "art": ["|"] } } }"#,
        )
        .unwrap();
        let mut catalog = AssetCatalog::builtin();
        catalog.merge(pack);
        let assets = Assets::resolve(&catalog).unwrap();
        assert_eq!(assets.tree.size, Size::new(60.0, 200.0));
        assert_eq!(assets.tree.color, Color::White);
        assert_eq!(assets.metrics().tree, Size::new(60.0, 200.0));
    }

    #[test]
    fn test_bird_frame_wraps() {
        let assets = Assets::builtin().unwrap();
        assert_eq!(assets.bird_frame(4).key, "bird2");
    }

    #[test]
    fn test_load_missing_pack_is_read_error() {
        let path = std::env::temp_dir().join("soaring-assets-that-do-not-exist.json");
        assert!(matches!(
            AssetCatalog::load(&path),
            Err(AssetError::Read { .. })
        ));
    }
}

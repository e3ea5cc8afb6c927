//! Asset lookup with placeholder fallbacks
//!
//! Missing or unreadable files never stop the game: every lookup yields
//! either the file's bytes or a placeholder the renderer/audio layer knows
//! how to present (a solid box, or silence).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::sim::{FruitKind, ObjectView, VisualState};

/// Stand-in for a missing asset
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    /// Solid rectangle of the given colour and size
    SolidBox { color: [u8; 3], width: f32, height: f32 },
    /// Sound that plays nothing
    Silence,
}

impl Placeholder {
    pub fn square(color: [u8; 3], size: f32) -> Self {
        Placeholder::SolidBox {
            color,
            width: size,
            height: size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    File { path: PathBuf, bytes: Vec<u8> },
    Placeholder(Placeholder),
}

impl Asset {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Asset::Placeholder(_))
    }

    /// Audio/image payload, `None` for placeholders
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Asset::File { bytes, .. } => Some(bytes),
            Asset::Placeholder(_) => None,
        }
    }
}

/// Read `path`, or hand back `fallback` if it cannot be read
pub fn load_or_placeholder(path: &Path, fallback: Placeholder) -> Asset {
    match fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => Asset::File {
            path: path.to_path_buf(),
            bytes,
        },
        Ok(_) => {
            log::warn!("{} is empty, using placeholder", path.display());
            Asset::Placeholder(fallback)
        }
        Err(e) => {
            log::warn!("Unable to load {}: {}, using placeholder", path.display(), e);
            Asset::Placeholder(fallback)
        }
    }
}

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const EXPLOSION_ORANGE: [u8; 3] = [255, 100, 0];
const BACKGROUND_GREY: [u8; 3] = [50, 50, 50];

/// Sprites for every fruit in every visual state, sized for one mode
#[derive(Debug, Clone)]
pub struct SpriteSet {
    sprites: HashMap<(FruitKind, VisualState), Asset>,
    background: Asset,
}

impl SpriteSet {
    const ALL_FRUITS: [FruitKind; 6] = [
        FruitKind::Melon,
        FruitKind::Orange,
        FruitKind::Pomegranate,
        FruitKind::Guava,
        FruitKind::Bomb,
        FruitKind::IceCube,
    ];

    /// Load from `root/images`, with placeholders of side `size`
    pub fn load(root: &Path, size: f32) -> Self {
        let images = root.join("images");
        let mut sprites = HashMap::new();
        let explosion = load_or_placeholder(
            &images.join("explosion.png"),
            Placeholder::square(EXPLOSION_ORANGE, size),
        );

        for fruit in Self::ALL_FRUITS {
            let name = fruit.name();
            let whole_color = if fruit == FruitKind::Bomb { RED } else { GREEN };
            sprites.insert(
                (fruit, VisualState::Whole),
                load_or_placeholder(
                    &images.join(format!("{name}.png")),
                    Placeholder::square(whole_color, size),
                ),
            );
            sprites.insert(
                (fruit, VisualState::Struck),
                load_or_placeholder(
                    &images.join(format!("half_{name}.png")),
                    Placeholder::square(GREEN, size),
                ),
            );
            sprites.insert((fruit, VisualState::Exploded), explosion.clone());
        }

        let background = load_or_placeholder(
            &images.join("background.jpg"),
            Placeholder::SolidBox {
                color: BACKGROUND_GREY,
                width: PLAY_WIDTH,
                height: PLAY_HEIGHT,
            },
        );

        let missing = sprites.values().filter(|a| a.is_placeholder()).count();
        if missing > 0 {
            log::info!("{} sprite(s) replaced by placeholders", missing);
        }

        Self {
            sprites,
            background,
        }
    }

    pub fn sprite(&self, fruit: FruitKind, visual: VisualState) -> Option<&Asset> {
        self.sprites.get(&(fruit, visual))
    }

    /// Sprite for an object in a render snapshot
    pub fn for_view(&self, view: &ObjectView) -> Option<&Asset> {
        self.sprite(view.fruit, view.visual)
    }

    pub fn background(&self) -> &Asset {
        &self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let asset = load_or_placeholder(
            &dir.path().join("missing.png"),
            Placeholder::square(RED, 60.0),
        );
        assert_eq!(asset, Asset::Placeholder(Placeholder::square(RED, 60.0)));
        assert!(asset.bytes().is_none());
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("melon.png");
        fs::write(&path, [1u8, 2, 3]).unwrap();
        let asset = load_or_placeholder(&path, Placeholder::Silence);
        assert_eq!(asset.bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_sprite_set_without_assets_uses_sized_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let set = SpriteSet::load(dir.path(), 70.0);

        assert_eq!(
            set.sprite(FruitKind::Bomb, VisualState::Whole),
            Some(&Asset::Placeholder(Placeholder::square(RED, 70.0)))
        );
        assert_eq!(
            set.sprite(FruitKind::Melon, VisualState::Whole),
            Some(&Asset::Placeholder(Placeholder::square(GREEN, 70.0)))
        );
        assert_eq!(
            set.sprite(FruitKind::Bomb, VisualState::Exploded),
            Some(&Asset::Placeholder(Placeholder::square(EXPLOSION_ORANGE, 70.0)))
        );
        assert!(set.background().is_placeholder());
    }

    #[test]
    fn test_sprite_set_mixes_files_and_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("orange.png"), b"png").unwrap();

        let set = SpriteSet::load(dir.path(), 60.0);
        let orange = set.sprite(FruitKind::Orange, VisualState::Whole).unwrap();
        assert!(!orange.is_placeholder());
        let half = set.sprite(FruitKind::Orange, VisualState::Struck).unwrap();
        assert!(half.is_placeholder());
    }
}

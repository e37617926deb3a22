//! Font and texture loading.
//!
//! Assets are resolved by logical filename below an asset directory, loaded
//! at most once, and shared read-only afterwards.

use std::{
    collections::HashMap,
    env, fs,
    path::{Component, Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Name of the directory searched for when no asset directory is configured.
pub const ASSET_DIR_NAME: &str = "assets";

/// A loaded font.
#[derive(Debug, PartialEq, Eq)]
pub struct Font {
    /// Logical filename.
    pub name: String,
    /// Raw font file contents.
    pub data: Vec<u8>,
}

/// A loaded texture.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    /// Logical filename.
    pub name: String,
    /// Raw image file contents.
    pub data: Vec<u8>,
}

/// Cache of loaded fonts and textures.
#[derive(Debug, Default)]
pub struct Assets {
    /// Asset root. Located lazily when not configured.
    dir: Option<PathBuf>,
    /// Loaded fonts by logical filename.
    fonts: HashMap<String, Rc<Font>>,
    /// Loaded textures by logical filename.
    textures: HashMap<String, Rc<Texture>>,
}

impl Assets {
    /// Create an asset cache rooted at `dir`, or at a located `assets`
    /// directory if `None`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            ..Default::default()
        }
    }

    /// The asset root, locating it on first use.
    pub fn dir(&mut self) -> Result<&Path> {
        if self.dir.is_none() {
            let found = locate()?;
            debug!(dir = %found.display(), "located asset directory");
            self.dir = Some(found);
        }
        self.dir
            .as_deref()
            .ok_or_else(|| Error::Resource("no asset directory".into()))
    }

    /// Fetch a font, loading it on first use.
    pub fn font(&mut self, name: &str) -> Result<Rc<Font>> {
        if let Some(font) = self.fonts.get(name) {
            return Ok(font.clone());
        }
        let data = read(self.dir()?, name)?;
        let font = Rc::new(Font {
            name: name.to_string(),
            data,
        });
        self.fonts.insert(name.to_string(), font.clone());
        Ok(font)
    }

    /// Fetch a texture, loading it on first use.
    pub fn texture(&mut self, name: &str) -> Result<Rc<Texture>> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(texture.clone());
        }
        let data = read(self.dir()?, name)?;
        let texture = Rc::new(Texture {
            name: name.to_string(),
            data,
        });
        self.textures.insert(name.to_string(), texture.clone());
        Ok(texture)
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.fonts.len() + self.textures.len()
    }

    /// True if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Walk upward from the executable's directory looking for an asset
/// directory.
fn locate() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::Resource(format!("current exe: {e}")))?;
    exe.ancestors()
        .skip(1)
        .map(|dir| dir.join(ASSET_DIR_NAME))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| {
            warn!(exe = %exe.display(), "no asset directory found");
            Error::Resource(format!(
                "no {ASSET_DIR_NAME} directory above {}",
                exe.display()
            ))
        })
}

/// Read an asset file. Names must be relative and stay below the root.
fn read(dir: &Path, name: &str) -> Result<Vec<u8>> {
    let rel = Path::new(name);
    if name.is_empty()
        || rel.is_absolute()
        || rel.components().any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::Resource(format!("invalid asset name {name:?}")));
    }
    let path = dir.join(rel);
    fs::read(&path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to load asset");
        Error::Resource(format!("{name}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use std::process;

    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("trellis-assets-{tag}-{}", process::id()));
        fs::create_dir_all(dir.join("fonts")).unwrap();
        dir
    }

    #[test]
    fn loads_once_and_shares() {
        let dir = scratch("once");
        fs::write(dir.join("fonts/mono.ttf"), b"font-bytes").unwrap();

        let mut assets = Assets::new(Some(dir.clone()));
        let a = assets.font("fonts/mono.ttf").unwrap();
        assert_eq!(a.data, b"font-bytes");

        // Later changes on disk are not observed: the first load is cached.
        fs::write(dir.join("fonts/mono.ttf"), b"changed").unwrap();
        let b = assets.font("fonts/mono.ttf").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(assets.len(), 1);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = scratch("retry");
        let mut assets = Assets::new(Some(dir.clone()));
        assert!(matches!(
            assets.texture("missing.png"),
            Err(Error::Resource(_))
        ));
        assert!(assets.is_empty());

        fs::write(dir.join("missing.png"), b"png").unwrap();
        assert_eq!(assets.texture("missing.png").unwrap().data, b"png");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rejects_escaping_names() {
        let dir = scratch("escape");
        let mut assets = Assets::new(Some(dir.clone()));
        assert!(assets.font("../secret").is_err());
        assert!(assets.font("").is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}

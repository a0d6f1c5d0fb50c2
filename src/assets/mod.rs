//! Texture table and loading textures from disk.

pub mod png;

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use smol_str::SmolStr;
use walkdir::WalkDir;

use crate::{
    backend::{Renderer, Texture},
    error::{Error, Result},
};

/// Extension of all files that are loaded as textures.
const TEXTURE_EXTENSION: &str = "png";

/// All textures available for creating sprites, by name.
#[derive(Debug, Default)]
pub struct Textures {
    /// Textures by the stem of their file name.
    textures: HashMap<SmolStr, Texture>,
}

impl Textures {
    /// Load every PNG in a directory and its subdirectories, uploading them with the renderer.
    ///
    /// Textures are registered under their file stem, so `Graphics/enemies/slime.png` becomes `"slime"`.
    /// Files deeper in the tree or later in file name order replace earlier ones with the same stem.
    ///
    /// # Returns
    ///
    /// - Amount of textures loaded.
    ///
    /// # Errors
    ///
    /// - When a PNG could not be read or decoded.
    pub fn load_dir(&mut self, dir: &Path, renderer: &mut dyn Renderer) -> Result<usize> {
        profiling::scope!("Load textures");

        let mut loaded = 0;
        for path in texture_files(dir) {
            // The name is the file without directories and extension
            let Some(name) = path.file_stem().map(|stem| SmolStr::new(stem.to_string_lossy()))
            else {
                continue;
            };

            log::debug!("Loading texture '{name}' from '{}'", path.display());

            let (width, height, pixels) = png::decode(&path)?;
            let reference = renderer.upload_texture(width, height, &pixels);

            if self
                .insert(Texture::new(reference, width, height, name.clone()))
                .is_some()
            {
                log::warn!(
                    "Texture '{name}' from '{}' replaces an earlier texture with the same name",
                    path.display()
                );
            }
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Register a texture under its name, replacing any with the same name.
    ///
    /// # Returns
    ///
    /// - The replaced texture, if any.
    #[inline]
    pub fn insert(&mut self, texture: Texture) -> Option<Texture> {
        self.textures.insert(texture.name.clone(), texture)
    }

    /// Get a texture by name.
    ///
    /// # Errors
    ///
    /// - When no texture with the name is registered.
    #[inline]
    pub fn get(&self, name: &str) -> Result<&Texture> {
        self.textures.get(name).ok_or_else(|| Error::MissingTexture {
            name: SmolStr::new(name),
        })
    }

    /// Whether a texture with the name is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Amount of registered textures.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no textures are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Find all texture files in a directory tree.
///
/// Unreadable entries are skipped.
fn texture_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        // Make it deterministic
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case(TEXTURE_EXTENSION))
        })
        .collect()
}

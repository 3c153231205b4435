//! # hometray-adapter-assets-fs
//!
//! Looks icon assets up in a directory on disk. A stem such as
//! `mdi-lightbulb-on` maps to `<dir>/mdi-lightbulb-on.<extension>`.
//!
//! ## Dependency rule
//!
//! Depends on `hometray-app` (port traits) only.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use hometray_app::ports::{AssetPath, AssetStore};

/// Where icon files live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the icon files.
    pub dir: PathBuf,
    /// File extension, without the dot.
    pub extension: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("icons"),
            extension: "svg".to_string(),
        }
    }
}

/// [`AssetStore`] backed by a directory of image files.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    dir: PathBuf,
    extension: String,
}

impl FsAssetStore {
    #[must_use]
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
        }
    }

    /// Directory searched by this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, stem: &str) -> Option<PathBuf> {
        let file_name = format!("{stem}.{}", self.extension);
        let mut components = Path::new(&file_name).components();
        // Stems are single file names; anything that would escape `dir` is rejected.
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.dir.join(file_name)),
            _ => None,
        }
    }
}

impl AssetStore for FsAssetStore {
    fn locate(&self, stem: &str) -> Option<AssetPath> {
        let path = self.path_for(stem)?;
        if path.is_file() {
            Some(AssetPath::new(path))
        } else {
            tracing::trace!(path = %path.display(), "asset not found");
            None
        }
    }
}

//! Asset store port: where icon files live.

use std::fmt;
use std::path::{Path, PathBuf};

/// Location of a presentation asset, as understood by the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(PathBuf);

impl AssetPath {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Lookup of icon assets by stem (`mdi-lightbulb-on`, `default-off`, ...).
pub trait AssetStore {
    /// Return the asset for `stem`, or `None` when the store does not ship it.
    fn locate(&self, stem: &str) -> Option<AssetPath>;
}

impl<T: AssetStore + ?Sized> AssetStore for std::sync::Arc<T> {
    fn locate(&self, stem: &str) -> Option<AssetPath> {
        (**self).locate(stem)
    }
}

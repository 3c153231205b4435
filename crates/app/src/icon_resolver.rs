//! Icon resolver: maps an entity's icon name and state to an asset.
//!
//! Candidate stems are `<normalized-icon-name>-<state>`, where normalization
//! turns the hub's `mdi:lightbulb` notation into `mdi-lightbulb`. When the
//! store does not ship the candidate, the state default `default-<state>`
//! is used instead.

use hometray_domain::entity::EntityState;
use hometray_domain::error::AssetError;

use crate::ports::{AssetPath, AssetStore};

/// Stems every installation must ship.
pub const REQUIRED_DEFAULTS: [&str; 2] = ["default-on", "default-off"];

/// Pure lookup from `(icon_name, state)` to an [`AssetPath`].
#[derive(Debug)]
pub struct IconResolver<A> {
    store: A,
}

impl<A: AssetStore> IconResolver<A> {
    /// Wrap `store`, checking that the mandatory defaults exist.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingDefault`] if `default-on` or
    /// `default-off` is absent. This is a broken installation and should
    /// stop startup.
    pub fn new(store: A) -> Result<Self, AssetError> {
        for stem in REQUIRED_DEFAULTS {
            if store.locate(stem).is_none() {
                return Err(AssetError::MissingDefault {
                    stem: stem.to_string(),
                });
            }
        }
        Ok(Self { store })
    }

    /// Resolve the asset for an icon in a given state.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Missing`] when neither the specific asset nor
    /// `default-<state>` exists, which happens for states without a shipped
    /// default (e.g. `unavailable`).
    pub fn resolve(&self, icon_name: &str, state: &EntityState) -> Result<AssetPath, AssetError> {
        let candidate = candidate_stem(icon_name, state);
        if let Some(path) = self.store.locate(&candidate) {
            return Ok(path);
        }

        let fallback = default_stem(state);
        self.store
            .locate(&fallback)
            .ok_or(AssetError::Missing { stem: fallback })
    }
}

/// Normalize a hub icon name into an asset stem prefix.
#[must_use]
pub fn normalize_icon_name(icon_name: &str) -> String {
    icon_name.replace(':', "-")
}

fn candidate_stem(icon_name: &str, state: &EntityState) -> String {
    format!("{}-{state}", normalize_icon_name(icon_name))
}

fn default_stem(state: &EntityState) -> String {
    format!("default-{state}")
}

//! Entity snapshot: an immutable view of one hub entity.
//!
//! A snapshot is never mutated after it is built. Each refresh produces a
//! new one that replaces the previous snapshot as a whole.

mod state;

pub use state::EntityState;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::EntityId;

/// Icon name used when the hub does not report one.
pub const DEFAULT_ICON: &str = "default";

/// State of one entity at the moment it was read from the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: EntityId,
    pub state: EntityState,
    /// Logical icon identifier (e.g. `mdi:lightbulb`).
    pub icon_name: String,
    pub friendly_name: String,
    pub last_updated: DateTime<Utc>,
}

impl EntitySnapshot {
    /// Start building a snapshot.
    #[must_use]
    pub fn builder() -> EntitySnapshotBuilder {
        EntitySnapshotBuilder::default()
    }
}

/// Builder for [`EntitySnapshot`].
#[derive(Debug, Default)]
pub struct EntitySnapshotBuilder {
    entity_id: Option<String>,
    state: EntityState,
    icon_name: Option<String>,
    friendly_name: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl EntitySnapshotBuilder {
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<EntityState>) -> Self {
        self.state = state.into();
        self
    }

    #[must_use]
    pub fn icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = Some(friendly_name.into());
        self
    }

    #[must_use]
    pub fn last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Validate and build the snapshot.
    ///
    /// Missing or blank icon names fall back to [`DEFAULT_ICON`]; a missing
    /// friendly name falls back to the entity id and a missing timestamp to
    /// the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the entity id is absent or malformed.
    pub fn build(self) -> Result<EntitySnapshot, ValidationError> {
        let entity_id = EntityId::parse(self.entity_id.unwrap_or_default())?;
        let icon_name = self
            .icon_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        let friendly_name = self
            .friendly_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| entity_id.to_string());

        Ok(EntitySnapshot {
            entity_id,
            state: self.state,
            icon_name,
            friendly_name,
            last_updated: self.last_updated.unwrap_or_else(Utc::now),
        })
    }
}

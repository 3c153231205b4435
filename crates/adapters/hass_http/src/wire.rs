//! JSON shapes of the Home Assistant REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hometray_domain::entity::EntitySnapshot;
use hometray_domain::error::ValidationError;

/// One element of `GET /api/states` or the body of `GET /api/states/<id>`.
#[derive(Debug, Deserialize)]
pub(crate) struct StateResponse {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// The attributes this crate cares about; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Attributes {
    pub icon: Option<String>,
    pub friendly_name: Option<String>,
}

impl StateResponse {
    pub fn into_snapshot(self) -> Result<EntitySnapshot, ValidationError> {
        let mut builder = EntitySnapshot::builder()
            .entity_id(self.entity_id)
            .state(self.state);
        if let Some(icon) = self.attributes.icon {
            builder = builder.icon_name(icon);
        }
        if let Some(name) = self.attributes.friendly_name {
            builder = builder.friendly_name(name);
        }
        if let Some(ts) = self.last_updated {
            builder = builder.last_updated(ts);
        }
        builder.build()
    }
}

/// Body of `POST /api/services/<domain>/<service>`.
#[derive(Debug, Serialize)]
pub(crate) struct ServiceTarget<'a> {
    pub entity_id: &'a str,
}

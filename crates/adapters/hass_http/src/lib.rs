//! # hometray-adapter-hass-http
//!
//! Home Assistant adapter: reads entity state and toggles entities through
//! the hub's REST API.
//!
//! ## Endpoints used
//!
//! | Operation | Request |
//! |-----------|---------|
//! | Read one entity | `GET {api_url}/states/{entity_id}` |
//! | Toggle | `POST {api_url}/services/homeassistant/toggle` |
//! | List a domain | `GET {api_url}/states`, filtered client-side |
//!
//! Every request carries `Authorization: Bearer <token>`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `hometray-app` and `hometray-domain`.

mod config;
mod error;
mod wire;

pub use config::HassConfig;
pub use error::HassError;

use std::time::Duration;

use reqwest::StatusCode;

use hometray_app::ports::StateSource;
use hometray_domain::entity::EntitySnapshot;
use hometray_domain::error::HomeTrayError;
use hometray_domain::id::EntityId;

use wire::{ServiceTarget, StateResponse};

/// HTTP client bound to one hub.
#[derive(Debug, Clone)]
pub struct HassClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl HassClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HassError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &HassConfig) -> Result<Self, HassError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url)
    }

    async fn fetch_state(&self, entity_id: &EntityId) -> Result<EntitySnapshot, HassError> {
        let response = self
            .http
            .get(self.url(&format!("states/{entity_id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(HassError::NotFound(entity_id.to_string())),
            status if !status.is_success() => Err(HassError::Status(status)),
            _ => response
                .json::<StateResponse>()
                .await?
                .into_snapshot()
                .map_err(HassError::InvalidEntity),
        }
    }

    async fn call_toggle(&self, entity_id: &EntityId) -> Result<(), HassError> {
        let response = self
            .http
            .post(self.url("services/homeassistant/toggle"))
            .bearer_auth(&self.token)
            .json(&ServiceTarget {
                entity_id: entity_id.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(HassError::Status(status))
        }
    }

    async fn fetch_domain(&self, domain: &str) -> Result<Vec<EntityId>, HassError> {
        let response = self
            .http
            .get(self.url("states"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HassError::Status(status));
        }

        let states = response.json::<Vec<StateResponse>>().await?;
        Ok(states
            .into_iter()
            .filter_map(|state| match EntityId::parse(state.entity_id) {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::debug!(%err, "skipping entity with malformed id");
                    None
                }
            })
            .filter(|id| id.domain() == domain)
            .collect())
    }
}

impl StateSource for HassClient {
    async fn get_entity(&self, entity_id: &EntityId) -> Result<EntitySnapshot, HomeTrayError> {
        tracing::trace!(%entity_id, "reading entity state");
        Ok(self.fetch_state(entity_id).await?)
    }

    async fn toggle(&self, entity_id: &EntityId) -> Result<(), HomeTrayError> {
        tracing::debug!(%entity_id, "toggling entity");
        Ok(self.call_toggle(entity_id).await?)
    }

    async fn list_entities(&self, domain: &str) -> Result<Vec<EntityId>, HomeTrayError> {
        tracing::trace!(domain = %domain, "listing domain entities");
        Ok(self.fetch_domain(domain).await?)
    }
}

//! Home Assistant adapter error types.

use hometray_domain::error::{HomeTrayError, NotFoundError, ValidationError};

/// Errors specific to talking to the hub over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HassError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The hub answered with an unexpected status code.
    #[error("hub answered {0}")]
    Status(reqwest::StatusCode),

    /// The hub does not know the entity.
    #[error("entity {0} not found on hub")]
    NotFound(String),

    /// The hub returned an entity this crate cannot represent.
    #[error("hub returned an invalid entity")]
    InvalidEntity(#[source] ValidationError),
}

impl HassError {
    /// Convert into a [`HomeTrayError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> HomeTrayError {
        match self {
            Self::NotFound(id) => NotFoundError {
                entity: "Entity",
                id,
            }
            .into(),
            other => HomeTrayError::Source(Box::new(other)),
        }
    }
}

impl From<HassError> for HomeTrayError {
    fn from(err: HassError) -> Self {
        err.into_domain()
    }
}

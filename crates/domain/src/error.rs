//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeTrayError`] via `#[from]` or an explicit `into_domain()`.

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HomeTrayError {
    /// A value failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The hub does not know the requested entity.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// No presentation asset could be found.
    #[error("asset resolution failed")]
    Asset(#[from] AssetError),

    /// The state source failed (network, HTTP status, malformed payload).
    #[error("state source error")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HomeTrayError {
    /// Whether this error means the entity does not exist on the hub.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An entity id was empty.
    #[error("entity id must not be empty")]
    EmptyEntityId,

    /// An entity id did not have the `<domain>.<object_id>` shape, with both
    /// parts made of lower-case ASCII letters, digits and `_`.
    #[error("entity id {0:?} must look like <domain>.<object_id>")]
    MalformedEntityId(String),
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing looked up (e.g. `"Entity"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// Icon asset lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    /// One of the mandatory `default-on` / `default-off` assets is absent.
    #[error("mandatory asset {stem} is missing from the asset store")]
    MissingDefault {
        /// Asset stem that was expected.
        stem: String,
    },

    /// Neither the specific nor the state default asset exists.
    #[error("no asset for {stem}")]
    Missing {
        /// Last stem tried.
        stem: String,
    },
}

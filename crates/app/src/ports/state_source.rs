//! State source port: read and toggle entities on the remote hub.

use std::future::Future;

use hometray_domain::entity::EntitySnapshot;
use hometray_domain::error::HomeTrayError;
use hometray_domain::id::EntityId;

/// The remote hub, seen as a source of entity snapshots plus one write action.
///
/// Transport and authentication are the adapter's business; the core only
/// sees snapshots and errors.
pub trait StateSource {
    /// Read the current state of one entity.
    ///
    /// Implementations return [`HomeTrayError::NotFound`] when the hub does
    /// not know the entity.
    fn get_entity(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Result<EntitySnapshot, HomeTrayError>> + Send;

    /// Flip a binary entity.
    fn toggle(&self, entity_id: &EntityId) -> impl Future<Output = Result<(), HomeTrayError>> + Send;

    /// List every entity id under `domain` (e.g. `"light"`).
    fn list_entities(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<EntityId>, HomeTrayError>> + Send;
}

impl<T: StateSource + Send + Sync> StateSource for std::sync::Arc<T> {
    fn get_entity(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Result<EntitySnapshot, HomeTrayError>> + Send {
        (**self).get_entity(entity_id)
    }

    fn toggle(&self, entity_id: &EntityId) -> impl Future<Output = Result<(), HomeTrayError>> + Send {
        (**self).toggle(entity_id)
    }

    fn list_entities(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<EntityId>, HomeTrayError>> + Send {
        (**self).list_entities(domain)
    }
}

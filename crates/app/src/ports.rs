//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the synchronization core and the outside
//! world: the hub that owns entity state, the store that ships icon assets,
//! and the surface that renders icons and reports clicks.

pub mod asset_store;
pub mod presentation;
pub mod state_source;

pub use asset_store::{AssetPath, AssetStore};
pub use presentation::{IconHandle, PresentationSurface, SurfaceEvent};
pub use state_source::StateSource;

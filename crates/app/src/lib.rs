//! # hometray-app
//!
//! Application layer: the entity state synchronization engine and its
//! **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `StateSource`: read, toggle and list entities on the hub
//!   - `AssetStore`: look up icon assets by stem
//!   - `PresentationSurface`: show and remove icons
//! - Resolve icons for entity states (`IconResolver`)
//! - Mirror each entity with an `EntityMonitor` refreshed by a self-rescheduling `Ticker`
//! - Own the set of monitors (`MonitorSupervisor`)
//! - Keep all surface mutations on the presentation loop (`UiLoop`)
//!
//! ## Dependency rule
//! Depends on `hometray-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod icon_resolver;
pub mod monitor;
pub mod ports;
pub mod selection;
pub mod supervisor;
pub mod ticker;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

//! # hometray-domain
//!
//! Pure domain model for the hometray state mirror.
//!
//! ## Responsibilities
//! - Foundational types: typed entity identifiers, error conventions
//! - Define **entity snapshots** (an immutable view of one hub entity at one point in time)
//! - Define the discrete **entity state** values reported by the hub
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod entity;

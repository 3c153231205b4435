//! Presentation surface port: renders one icon per monitor.
//!
//! Surfaces are usually bound to a single UI thread. The core never calls a
//! surface directly from a polling task; every mutation is marshalled through
//! [`UiHandle`](crate::ui::UiHandle) and applied by the
//! [`UiLoop`](crate::ui::UiLoop) that owns the surface.

use std::fmt;

use super::asset_store::AssetPath;

/// Opaque handle identifying one icon on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconHandle(u32);

impl IconHandle {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for IconHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Something that can show icons with a tooltip.
pub trait PresentationSurface {
    /// Show or replace the icon for `handle`.
    fn set_icon(&mut self, handle: IconHandle, asset: &AssetPath, tooltip: &str);

    /// Remove the icon for `handle`. Unknown handles are ignored.
    fn remove_icon(&mut self, handle: IconHandle);
}

/// Events a surface reports back to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The user clicked the icon.
    Activate(IconHandle),
    /// The user (or the OS) asked the process to exit.
    ExitRequested,
}

//! # hometray-adapter-console
//!
//! Terminal stand-in for a system tray.
//!
//! - Every icon change is printed as one status line:
//!   `[<handle>] <tooltip>  (<asset path>)`.
//! - Typing an icon number and pressing enter clicks that icon.
//! - `q`, `quit`, `exit` or Ctrl+C request shutdown.
//!
//! ## Dependency rule
//!
//! Depends on `hometray-app` (port traits) only.

mod input;

pub use input::{InputLine, parse_line, spawn_ctrl_c, spawn_input, spawn_stdin};

use std::collections::BTreeMap;
use std::io::{self, Write};

use hometray_app::ports::{AssetPath, IconHandle, PresentationSurface};

/// [`PresentationSurface`] writing status lines to any [`Write`] sink.
pub struct ConsoleSurface<W> {
    out: W,
    shown: BTreeMap<IconHandle, (AssetPath, String)>,
}

impl ConsoleSurface<io::Stdout> {
    /// Surface printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSurface<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: BTreeMap::new(),
        }
    }

    /// Icons currently on screen with their asset and tooltip.
    #[must_use]
    pub fn shown(&self) -> &BTreeMap<IconHandle, (AssetPath, String)> {
        &self.shown
    }

    /// Print the key bindings.
    pub fn print_help(&mut self) {
        self.write_line(format_args!(
            "type an icon number and press enter to toggle it, `q` to quit"
        ));
    }

    /// Give back the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(%err, "failed to write to console");
        }
    }
}

impl<W: Write> PresentationSurface for ConsoleSurface<W> {
    fn set_icon(&mut self, handle: IconHandle, asset: &AssetPath, tooltip: &str) {
        let unchanged = self
            .shown
            .get(&handle)
            .is_some_and(|(a, t)| a == asset && t == tooltip);
        if unchanged {
            return;
        }
        self.write_line(format_args!("[{handle}] {tooltip}  ({asset})"));
        self.shown
            .insert(handle, (asset.clone(), tooltip.to_string()));
    }

    fn remove_icon(&mut self, handle: IconHandle) {
        if self.shown.remove(&handle).is_some() {
            self.write_line(format_args!("[{handle}] removed"));
        }
    }
}

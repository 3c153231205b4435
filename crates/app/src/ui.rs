//! UI affinity boundary.
//!
//! Presentation toolkits must only be touched from their own loop. Monitors
//! therefore never hold the surface: they push [`UiCommand`]s through a
//! [`UiHandle`], and the [`UiLoop`] that owns the surface applies them in
//! order. The same loop receives clicks and the exit request from the
//! surface.

use tokio::sync::mpsc;

use crate::ports::{AssetPath, AssetStore, IconHandle, PresentationSurface, StateSource, SurfaceEvent};
use crate::supervisor::MonitorSupervisor;

/// A mutation to apply on the presentation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetIcon {
        handle: IconHandle,
        asset: AssetPath,
        tooltip: String,
    },
    RemoveIcon {
        handle: IconHandle,
    },
}

/// Cloneable sender side of the presentation loop.
#[derive(Debug, Clone)]
pub struct UiHandle {
    sender: mpsc::UnboundedSender<UiCommand>,
}

impl UiHandle {
    /// Create a handle and the command receiver a [`UiLoop`] consumes.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Queue an icon update.
    pub fn set_icon(&self, handle: IconHandle, asset: AssetPath, tooltip: String) {
        self.send(UiCommand::SetIcon {
            handle,
            asset,
            tooltip,
        });
    }

    /// Queue an icon removal.
    pub fn remove_icon(&self, handle: IconHandle) {
        self.send(UiCommand::RemoveIcon { handle });
    }

    fn send(&self, command: UiCommand) {
        if self.sender.send(command).is_err() {
            tracing::debug!("presentation loop is gone, dropping UI command");
        }
    }
}

/// The single execution context that owns the [`PresentationSurface`].
pub struct UiLoop<P> {
    surface: P,
    commands: mpsc::UnboundedReceiver<UiCommand>,
    events: mpsc::Receiver<SurfaceEvent>,
}

impl<P: PresentationSurface> UiLoop<P> {
    #[must_use]
    pub fn new(
        surface: P,
        commands: mpsc::UnboundedReceiver<UiCommand>,
        events: mpsc::Receiver<SurfaceEvent>,
    ) -> Self {
        Self {
            surface,
            commands,
            events,
        }
    }

    /// Run until the surface asks to exit.
    ///
    /// Clicks are handled inline: the loop does not apply other commands
    /// until the activation (poll, toggle, settle, poll) has finished. On
    /// exit every monitor is stopped, the resulting removals are applied,
    /// and the surface is handed back.
    pub async fn run<S, A>(mut self, supervisor: &mut MonitorSupervisor<S, A>) -> P
    where
        S: StateSource + Send + Sync + 'static,
        A: AssetStore + Send + Sync + 'static,
    {
        loop {
            tokio::select! {
                Some(command) = self.commands.recv() => self.apply(command),
                event = self.events.recv() => match event {
                    Some(SurfaceEvent::Activate(handle)) => {
                        supervisor.activate(handle).await;
                    }
                    Some(SurfaceEvent::ExitRequested) => {
                        tracing::info!("exit requested");
                        break;
                    }
                    None => {
                        tracing::info!("presentation surface closed");
                        break;
                    }
                },
            }
        }

        supervisor.stop_all().await;
        self.drain();
        self.surface
    }

    /// Apply every command queued so far.
    pub fn drain(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::SetIcon {
                handle,
                asset,
                tooltip,
            } => self.surface.set_icon(handle, &asset, &tooltip),
            UiCommand::RemoveIcon { handle } => self.surface.remove_icon(handle),
        }
    }
}

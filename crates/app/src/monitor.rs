//! Entity monitor: mirrors one hub entity as one icon.
//!
//! A monitor polls the [`StateSource`], keeps the last good snapshot,
//! resolves the icon and pushes it to the presentation loop. It also runs
//! the toggle sequence when the user clicks the icon.
//!
//! All network work for one entity is serialized by the phase lock, so a
//! periodic refresh never overlaps a click-triggered one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};

use hometray_domain::entity::EntitySnapshot;
use hometray_domain::error::HomeTrayError;
use hometray_domain::id::EntityId;

use crate::icon_resolver::IconResolver;
use crate::ports::{AssetStore, IconHandle, StateSource};
use crate::ui::UiHandle;

/// Default time between periodic refreshes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default pause between a toggle and the reconciliation poll.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Timing knobs shared by every monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub settle_delay: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Lifecycle of a monitor.
///
/// `Uninitialized → Polling ⇄ Idle → Toggling → Polling`, and `Stopped`
/// from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Uninitialized,
    Polling,
    Idle,
    Toggling,
    Stopped,
}

/// Owns the refresh and toggle logic for a single entity.
pub struct EntityMonitor<S, A> {
    entity_id: EntityId,
    icon: IconHandle,
    source: Arc<S>,
    resolver: Arc<IconResolver<A>>,
    ui: UiHandle,
    settle_delay: Duration,
    phase: Mutex<MonitorPhase>,
    last_state: watch::Sender<Option<Arc<EntitySnapshot>>>,
    /// Set once a missing icon was reported, cleared by the next render.
    icon_missing: AtomicBool,
}

impl<S, A> EntityMonitor<S, A>
where
    S: StateSource + Send + Sync,
    A: AssetStore,
{
    pub fn new(
        entity_id: EntityId,
        icon: IconHandle,
        source: Arc<S>,
        resolver: Arc<IconResolver<A>>,
        ui: UiHandle,
        settle_delay: Duration,
    ) -> Self {
        let (last_state, _) = watch::channel(None);
        Self {
            entity_id,
            icon,
            source,
            resolver,
            ui,
            settle_delay,
            phase: Mutex::new(MonitorPhase::Uninitialized),
            last_state,
            icon_missing: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    #[must_use]
    pub fn icon(&self) -> IconHandle {
        self.icon
    }

    /// Last snapshot read successfully, if any.
    #[must_use]
    pub fn last_state(&self) -> Option<Arc<EntitySnapshot>> {
        self.last_state.borrow().clone()
    }

    /// Watch snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<EntitySnapshot>>> {
        self.last_state.subscribe()
    }

    /// Current phase. Waits for an in-flight poll or toggle to finish.
    pub async fn phase(&self) -> MonitorPhase {
        *self.phase.lock().await
    }

    /// First poll, run once before the monitor is scheduled.
    ///
    /// # Errors
    ///
    /// Propagates the source or asset error; the caller decides whether the
    /// monitor is kept.
    pub async fn initialize(&self) -> Result<(), HomeTrayError> {
        let mut phase = self.phase.lock().await;
        if *phase != MonitorPhase::Uninitialized {
            return Ok(());
        }
        self.poll(&mut phase).await
    }

    /// Poll the hub and re-render.
    ///
    /// On failure the previous icon stays on screen. A stopped monitor does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns the source or asset error after logging it.
    pub async fn refresh(&self) -> Result<(), HomeTrayError> {
        let mut phase = self.phase.lock().await;
        if *phase == MonitorPhase::Stopped {
            return Ok(());
        }
        self.poll(&mut phase)
            .await
            .inspect_err(|err| self.report_failure(err, "refresh"))
    }

    /// One periodic tick.
    pub async fn tick(&self) {
        // Already logged; the next tick runs regardless.
        let _ = self.refresh().await;
    }

    /// Handle a click: poll, toggle, wait for the hub to settle, poll again.
    ///
    /// Every step runs even if an earlier one failed; what ends up on screen
    /// is whatever the hub reports after the settle delay.
    pub async fn activate(&self) {
        let mut phase = self.phase.lock().await;
        if *phase == MonitorPhase::Stopped {
            tracing::debug!(entity_id = %self.entity_id, "ignoring click on stopped monitor");
            return;
        }

        if let Err(err) = self.poll(&mut phase).await {
            self.report_failure(&err, "pre-toggle refresh");
        }

        *phase = MonitorPhase::Toggling;
        match self.source.toggle(&self.entity_id).await {
            Ok(()) => tracing::info!(entity_id = %self.entity_id, "toggled"),
            Err(err) => tracing::warn!(entity_id = %self.entity_id, %err, "toggle failed"),
        }

        tokio::time::sleep(self.settle_delay).await;

        if let Err(err) = self.poll(&mut phase).await {
            self.report_failure(&err, "post-toggle refresh");
        }
    }

    /// Stop the monitor and release its icon.
    ///
    /// Returns `true` for the call that actually stopped it; later calls are
    /// no-ops. An in-flight poll or toggle finishes first.
    pub async fn stop(&self) -> bool {
        let mut phase = self.phase.lock().await;
        if *phase == MonitorPhase::Stopped {
            return false;
        }
        *phase = MonitorPhase::Stopped;
        self.ui.remove_icon(self.icon);
        true
    }

    async fn poll(&self, phase: &mut MonitorPhase) -> Result<(), HomeTrayError> {
        *phase = MonitorPhase::Polling;
        let result = self.source.get_entity(&self.entity_id).await;
        *phase = MonitorPhase::Idle;

        let snapshot = Arc::new(result?);
        let asset = self.resolver.resolve(&snapshot.icon_name, &snapshot.state);
        let tooltip = snapshot.friendly_name.clone();
        tracing::debug!(entity_id = %self.entity_id, state = %snapshot.state, "polled");
        self.last_state.send_replace(Some(snapshot));

        match asset {
            Ok(asset) => {
                self.icon_missing.store(false, Ordering::Relaxed);
                self.ui.set_icon(self.icon, asset, tooltip);
                Ok(())
            }
            Err(err) => {
                if self.icon_missing.swap(true, Ordering::Relaxed) {
                    tracing::debug!(entity_id = %self.entity_id, %err, "still no icon for state");
                } else {
                    tracing::warn!(entity_id = %self.entity_id, %err, "no icon for state, keeping previous icon");
                }
                Err(err.into())
            }
        }
    }

    /// Log a failed poll. Missing icons are reported by `poll` itself.
    fn report_failure(&self, err: &HomeTrayError, step: &'static str) {
        if !matches!(err, HomeTrayError::Asset(_)) {
            tracing::warn!(entity_id = %self.entity_id, %err, step, "poll failed, keeping previous icon");
        }
    }
}

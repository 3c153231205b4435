//! Monitor supervisor: owns every [`EntityMonitor`] and its ticker.
//!
//! The supervisor is the only owner of the monitor registry. It resolves
//! which entities to watch, creates one monitor per entity, routes clicks
//! by icon handle, and tears everything down at shutdown.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use hometray_domain::id::EntityId;

use crate::icon_resolver::IconResolver;
use crate::monitor::{EntityMonitor, MonitorSettings};
use crate::ports::{AssetStore, IconHandle, StateSource};
use crate::selection::EntitySelection;
use crate::ticker::Ticker;
use crate::ui::UiHandle;

/// Registry record for one monitored entity.
pub struct MonitorHandle<S, A> {
    monitor: Arc<EntityMonitor<S, A>>,
    ticker: Ticker,
}

impl<S, A> MonitorHandle<S, A>
where
    S: StateSource + Send + Sync,
    A: AssetStore,
{
    #[must_use]
    pub fn monitor(&self) -> &Arc<EntityMonitor<S, A>> {
        &self.monitor
    }

    /// Whether the next periodic refresh is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Cancel the pending tick and stop the monitor.
    ///
    /// Safe to call repeatedly. Returns `true` only when this call cancelled
    /// a pending tick.
    pub async fn stop(&mut self) -> bool {
        let cancelled = self.ticker.cancel().await;
        self.monitor.stop().await;
        cancelled
    }
}

/// Creates, owns and stops the set of entity monitors.
pub struct MonitorSupervisor<S, A> {
    source: Arc<S>,
    resolver: Arc<IconResolver<A>>,
    ui: UiHandle,
    settings: MonitorSettings,
    monitors: BTreeMap<EntityId, MonitorHandle<S, A>>,
    by_icon: HashMap<IconHandle, EntityId>,
    next_icon: u32,
}

impl<S, A> MonitorSupervisor<S, A>
where
    S: StateSource + Send + Sync + 'static,
    A: AssetStore + Send + Sync + 'static,
{
    pub fn new(
        source: Arc<S>,
        resolver: IconResolver<A>,
        ui: UiHandle,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            source,
            resolver: Arc::new(resolver),
            ui,
            settings,
            monitors: BTreeMap::new(),
            by_icon: HashMap::new(),
            next_icon: 0,
        }
    }

    /// Turn the configured selection into the list of ids to monitor.
    ///
    /// Domains are listed on the hub one by one. A domain that cannot be
    /// listed is reported and skipped; the rest of the selection still
    /// applies.
    pub async fn resolve(&self, selection: &EntitySelection) -> Vec<EntityId> {
        let mut discovered = Vec::new();
        for domain in &selection.domains {
            match self.source.list_entities(domain).await {
                Ok(ids) => {
                    tracing::debug!(domain = %domain, count = ids.len(), "listed domain entities");
                    discovered.extend(ids);
                }
                Err(err) => {
                    tracing::error!(domain = %domain, %err, "failed to list domain entities, skipping domain");
                }
            }
        }
        selection.merge(discovered)
    }

    /// Create a monitor for each id.
    ///
    /// Each monitor polls once before it is registered. An id the hub does
    /// not know is reported and skipped; other first-poll failures keep the
    /// monitor, which catches up on a later tick. Ids already monitored are
    /// ignored. Returns the ids that got a monitor.
    pub async fn start(&mut self, entity_ids: impl IntoIterator<Item = EntityId>) -> Vec<EntityId> {
        let mut started = Vec::new();

        for entity_id in entity_ids {
            if self.monitors.contains_key(&entity_id) {
                tracing::debug!(entity_id = %entity_id, "already monitored");
                continue;
            }

            let icon = self.allocate_icon();
            let monitor = Arc::new(EntityMonitor::new(
                entity_id.clone(),
                icon,
                Arc::clone(&self.source),
                Arc::clone(&self.resolver),
                self.ui.clone(),
                self.settings.settle_delay,
            ));

            match monitor.initialize().await {
                Ok(()) => {}
                Err(err) if err.is_not_found() => {
                    tracing::error!(entity_id = %entity_id, %err, "entity not found on hub, not monitoring it");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(entity_id = %entity_id, %err, "initial refresh failed, retrying on next tick");
                }
            }

            let ticker = {
                let monitor = Arc::clone(&monitor);
                Ticker::spawn(self.settings.interval, move || {
                    let monitor = Arc::clone(&monitor);
                    async move { monitor.tick().await }
                })
            };

            tracing::info!(entity_id = %entity_id, %icon, "monitoring entity");
            self.by_icon.insert(icon, entity_id.clone());
            self.monitors
                .insert(entity_id.clone(), MonitorHandle { monitor, ticker });
            started.push(entity_id);
        }

        started
    }

    /// Resolve `selection` and start a monitor for each resulting id.
    pub async fn start_selection(&mut self, selection: &EntitySelection) -> Vec<EntityId> {
        let ids = self.resolve(selection).await;
        self.start(ids).await
    }

    /// Route a click to the monitor owning `icon`.
    ///
    /// Returns `false` when no monitor owns the handle.
    pub async fn activate(&self, icon: IconHandle) -> bool {
        let Some(handle) = self
            .by_icon
            .get(&icon)
            .and_then(|entity_id| self.monitors.get(entity_id))
        else {
            tracing::debug!(%icon, "click on unknown icon");
            return false;
        };
        handle.monitor.activate().await;
        true
    }

    /// Stop every monitor and wait until all ticks are cancelled and all
    /// icons released. Calling it again does nothing.
    pub async fn stop_all(&mut self) {
        let monitors = std::mem::take(&mut self.monitors);
        self.by_icon.clear();
        let count = monitors.len();

        for (entity_id, mut handle) in monitors {
            handle.stop().await;
            tracing::debug!(entity_id = %entity_id, "monitor stopped");
        }

        if count > 0 {
            tracing::info!(count, "all monitors stopped");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Monitored ids, in id order.
    pub fn entity_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.monitors.keys()
    }

    #[must_use]
    pub fn get(&self, entity_id: &EntityId) -> Option<&MonitorHandle<S, A>> {
        self.monitors.get(entity_id)
    }

    fn allocate_icon(&mut self) -> IconHandle {
        self.next_icon += 1;
        IconHandle::new(self.next_icon)
    }
}

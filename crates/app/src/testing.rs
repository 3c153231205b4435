//! In-memory port implementations shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use hometray_domain::entity::{EntitySnapshot, EntityState};
use hometray_domain::error::{HomeTrayError, NotFoundError};
use hometray_domain::id::EntityId;

use crate::ports::{AssetPath, AssetStore, IconHandle, PresentationSurface, StateSource};

pub(crate) fn id(raw: &str) -> EntityId {
    EntityId::parse(raw).unwrap()
}

pub(crate) fn snapshot(raw_id: &str, state: EntityState, icon: &str) -> EntitySnapshot {
    EntitySnapshot::builder()
        .entity_id(raw_id)
        .state(state)
        .icon_name(icon)
        .friendly_name(format!("Friendly {raw_id}"))
        .build()
        .unwrap()
}

// ── State source ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Get(EntityId),
    Toggle(EntityId),
    List(String),
}

/// Hub double: stores snapshots, flips on/off on toggle, records every call.
///
/// Gets and toggles can be given a latency; the double tracks how many of
/// them are in flight at once.
#[derive(Default)]
pub(crate) struct FakeSource {
    entities: Mutex<HashMap<EntityId, EntitySnapshot>>,
    domains: Mutex<HashMap<String, Vec<EntityId>>>,
    failing: Mutex<HashSet<EntityId>>,
    failing_toggle: Mutex<bool>,
    calls: Mutex<Vec<(Call, Instant)>>,
    latency: Mutex<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn with(snapshots: Vec<EntitySnapshot>) -> Self {
        let source = Self::default();
        for snapshot in snapshots {
            source.put(snapshot);
        }
        source
    }

    pub(crate) fn put(&self, snapshot: EntitySnapshot) {
        self.entities
            .lock()
            .unwrap()
            .insert(snapshot.entity_id.clone(), snapshot);
    }

    pub(crate) fn with_domain(self, domain: &str, ids: Vec<EntityId>) -> Self {
        self.domains.lock().unwrap().insert(domain.to_string(), ids);
        self
    }

    pub(crate) fn fail_gets_for(&self, entity_id: &EntityId, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(entity_id.clone());
        } else {
            set.remove(entity_id);
        }
    }

    pub(crate) fn fail_toggles(&self) {
        *self.failing_toggle.lock().unwrap() = true;
    }

    pub(crate) fn state_of(&self, entity_id: &EntityId) -> EntityState {
        self.entities.lock().unwrap()[entity_id].state.clone()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub(crate) fn timed_calls(&self) -> Vec<(Call, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count_gets(&self, entity_id: &EntityId) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get(id) if id == entity_id))
            .count()
    }

    pub(crate) fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Highest number of gets and toggles seen running at the same time.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((call, Instant::now()));
    }

    async fn answer<T>(&self, result: T) -> T {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn transient() -> HomeTrayError {
    HomeTrayError::Source(Box::new(std::io::Error::other("hub timed out")))
}

impl StateSource for FakeSource {
    fn get_entity(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Result<EntitySnapshot, HomeTrayError>> + Send {
        self.record(Call::Get(entity_id.clone()));
        let result = if self.failing.lock().unwrap().contains(entity_id) {
            Err(transient())
        } else {
            self.entities
                .lock()
                .unwrap()
                .get(entity_id)
                .cloned()
                .ok_or_else(|| {
                    NotFoundError {
                        entity: "Entity",
                        id: entity_id.to_string(),
                    }
                    .into()
                })
        };
        self.answer(result)
    }

    fn toggle(&self, entity_id: &EntityId) -> impl Future<Output = Result<(), HomeTrayError>> + Send {
        self.record(Call::Toggle(entity_id.clone()));
        let result = if *self.failing_toggle.lock().unwrap() {
            Err(transient())
        } else {
            let mut entities = self.entities.lock().unwrap();
            if let Some(current) = entities.get(entity_id).cloned() {
                let flipped = match current.state {
                    EntityState::On => EntityState::Off,
                    _ => EntityState::On,
                };
                entities.insert(
                    entity_id.clone(),
                    EntitySnapshot {
                        state: flipped,
                        ..current
                    },
                );
            }
            Ok(())
        };
        self.answer(result)
    }

    fn list_entities(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<EntityId>, HomeTrayError>> + Send {
        self.record(Call::List(domain.to_string()));
        let result = self
            .domains
            .lock()
            .unwrap()
            .get(domain)
            .cloned()
            .ok_or_else(transient);
        async { result }
    }
}

// ── Asset store ────────────────────────────────────────────────

pub(crate) struct InMemoryAssets {
    stems: HashSet<String>,
}

impl InMemoryAssets {
    pub(crate) fn with(stems: &[&str]) -> Self {
        Self {
            stems: stems.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub(crate) fn defaults() -> Self {
        Self::with(&["default-on", "default-off", "mdi-lightbulb-on", "mdi-lightbulb-off"])
    }
}

impl AssetStore for InMemoryAssets {
    fn locate(&self, stem: &str) -> Option<AssetPath> {
        self.stems.contains(stem).then(|| asset(stem))
    }
}

pub(crate) fn asset(stem: &str) -> AssetPath {
    AssetPath::new(format!("icons/{stem}.svg"))
}

// ── Presentation surface ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceOp {
    Set(IconHandle, AssetPath, String),
    Remove(IconHandle),
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub(crate) ops: Vec<SurfaceOp>,
    pub(crate) shown: HashMap<IconHandle, (AssetPath, String)>,
}

impl PresentationSurface for RecordingSurface {
    fn set_icon(&mut self, handle: IconHandle, asset: &AssetPath, tooltip: &str) {
        self.ops
            .push(SurfaceOp::Set(handle, asset.clone(), tooltip.to_string()));
        self.shown
            .insert(handle, (asset.clone(), tooltip.to_string()));
    }

    fn remove_icon(&mut self, handle: IconHandle) {
        self.ops.push(SurfaceOp::Remove(handle));
        self.shown.remove(&handle);
    }
}

use lamp_grid_protocol::{GlobalAction, HitTarget, Swatch};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::LampGridConfig;
use crate::error::LoadError;
use crate::intensity::VisualIntensity;
use crate::model::LampCollection;
use crate::ops;
use crate::persist::{Clock, Debouncer, Storage};

/// Where the current collection came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Loaded,
    Generated,
}

/// Aggregate figures for status lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreStats {
    pub active: usize,
    pub total: usize,
    pub mean_intensity: f64,
}

/// Owner of the lamp collection.
///
/// Renderers hold the store, call its operations in response to gestures,
/// and redraw whenever [`LampStore::revision`] changes. Every mutation
/// (re)starts the persistence timer; [`LampStore::poll`] writes once the
/// quiet period elapses and [`LampStore::flush`] writes immediately.
pub struct LampStore {
    lamps: LampCollection,
    selected: Option<u32>,
    picker_visible: bool,
    revision: u64,
    origin: Origin,
    rng: StdRng,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    debounce: Debouncer,
    key: String,
}

impl LampStore {
    /// Load the saved collection, or generate a fresh one when there is
    /// none or it cannot be used.
    pub fn initialize(
        config: &LampGridConfig,
        storage: Box<dyn Storage>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let (lamps, origin) = match load(storage.as_ref(), &config.storage_key) {
            Ok(lamps) => {
                tracing::info!(key = %config.storage_key, "restored saved lamps");
                (lamps, Origin::Loaded)
            }
            Err(LoadError::Missing) => {
                tracing::info!(key = %config.storage_key, "no saved lamps, generating");
                (LampCollection::generate(&mut rng), Origin::Generated)
            }
            Err(e) => {
                tracing::warn!(key = %config.storage_key, "discarding saved lamps: {e}");
                (LampCollection::generate(&mut rng), Origin::Generated)
            }
        };

        Self {
            lamps,
            selected: None,
            picker_visible: false,
            revision: 0,
            origin,
            rng,
            storage,
            clock,
            debounce: Debouncer::new(config.debounce_ms),
            key: config.storage_key.clone(),
        }
    }

    pub fn lamps(&self) -> &LampCollection {
        &self.lamps
    }

    /// Lamp targeted by the color picker.
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn picker_visible(&self) -> bool {
        self.picker_visible
    }

    /// Bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Turn a lamp on or off, select it, and reveal the color picker.
    ///
    /// Unknown ids are ignored. Returns whether anything changed.
    pub fn toggle_lamp(&mut self, id: u32) -> bool {
        let Some(next) = ops::toggle(&self.lamps, id, &mut self.rng) else {
            tracing::debug!(id, "toggle ignored: no such lamp");
            return false;
        };
        self.selected = Some(id);
        self.picker_visible = true;
        self.commit(next);
        true
    }

    /// Paint the selected lamp. No-op until a lamp has been toggled.
    pub fn set_selected_color(&mut self, color: Swatch) -> bool {
        let Some(id) = self.selected else {
            tracing::debug!(%color, "color ignored: no lamp selected");
            return false;
        };
        let Some(next) = ops::set_color(&self.lamps, id, color) else {
            return false;
        };
        self.commit(next);
        true
    }

    pub fn apply_global(&mut self, action: GlobalAction) {
        let next = ops::apply_global(&self.lamps, action, &mut self.rng);
        tracing::debug!(?action, "global action applied");
        self.commit(next);
    }

    /// Close the color picker. The selection is kept.
    pub fn hide_picker(&mut self) -> bool {
        if !self.picker_visible {
            return false;
        }
        self.picker_visible = false;
        self.revision += 1;
        true
    }

    /// Route a renderer hit target to the matching operation.
    pub fn dispatch(&mut self, target: HitTarget) -> bool {
        match target {
            HitTarget::Lamp(id) => self.toggle_lamp(id),
            HitTarget::Swatch(color) => self.set_selected_color(color),
            HitTarget::Global(action) => {
                self.apply_global(action);
                true
            }
            HitTarget::ClosePicker => self.hide_picker(),
        }
    }

    /// Write the collection if the debounce window has elapsed. Call this
    /// from the event loop; returns whether a write happened.
    pub fn poll(&mut self) -> bool {
        if self.debounce.take_due(self.clock.now_ms()) {
            self.persist();
            return true;
        }
        false
    }

    /// Write a pending collection now instead of waiting for the window.
    pub fn flush(&mut self) -> bool {
        if self.debounce.cancel() {
            self.persist();
            return true;
        }
        false
    }

    /// Milliseconds until the pending write, or `None` when nothing is
    /// pending. Renderers use it to schedule their next wake-up.
    pub fn pending_persist_ms(&self) -> Option<u64> {
        self.debounce.remaining(self.clock.now_ms())
    }

    /// Serialize the whole collection to storage right away.
    ///
    /// Failures are logged and dropped; the next mutation tries again.
    pub fn persist(&mut self) {
        let json = match self.lamps.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("serializing lamps failed: {e}");
                return;
            }
        };
        match self.storage.save(&self.key, &json) {
            Ok(()) => tracing::info!(key = %self.key, bytes = json.len(), "lamps saved"),
            Err(e) => tracing::warn!(key = %self.key, "saving lamps failed: {e}"),
        }
    }

    pub fn stats(&self) -> StoreStats {
        let total = self.lamps.len();
        let sum: f64 = self
            .lamps
            .iter()
            .map(|l| VisualIntensity::of(l).intensity)
            .sum();
        StoreStats {
            active: self.lamps.active_count(),
            total,
            mean_intensity: if total == 0 { 0.0 } else { sum / total as f64 },
        }
    }

    fn commit(&mut self, next: LampCollection) {
        self.lamps = next;
        self.revision += 1;
        self.debounce.schedule(self.clock.now_ms());
    }
}

fn load(storage: &dyn Storage, key: &str) -> Result<LampCollection, LoadError> {
    let raw = storage.load(key)?.ok_or(LoadError::Missing)?;
    LampCollection::from_json(&raw)
}

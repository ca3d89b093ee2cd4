use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::{ImportWizardModel, NavigationEventState};
use crate::event::{EventBus, EventListener, EventObject, ListenerError, ListenerRef};
use crate::shared::BusError;

/// Wizard page that publishes its model whenever the user changes it
pub struct ImportWizardPanel {
    bus: EventBus,
    model: Mutex<ImportWizardModel>,
}

impl ImportWizardPanel {
    pub fn new(bus: EventBus) -> Self {
        Self::with_model(bus, ImportWizardModel::new("foobar"))
    }

    pub fn with_model(bus: EventBus, model: ImportWizardModel) -> Self {
        Self {
            bus,
            model: Mutex::new(model),
        }
    }

    pub fn model(&self) -> ImportWizardModel {
        self.model.lock().clone()
    }

    pub fn set_model(&self, model: ImportWizardModel) {
        *self.model.lock() = model;
    }

    /// Posts the current model to every panel listening for it
    #[instrument(skip(self), fields(bus = %self.bus.name()))]
    pub fn fire_new_event(&self) -> Result<(), BusError> {
        let model = self.model();
        debug!(bundle_app_name = %model.bundle_app_name, "Publishing wizard model");
        self.bus.post(model)
    }

    /// Posts a navigation request (next, cancel, ...)
    pub fn navigate(&self, state: NavigationEventState) -> Result<(), BusError> {
        debug!(state = %state, "Publishing navigation request");
        self.bus.post(state)
    }
}

/// Panel that mirrors the latest wizard model it has been sent
#[derive(Default)]
pub struct ImportProgressPanel {
    model: Mutex<Option<ImportWizardModel>>,
}

impl ImportProgressPanel {
    /// Creates the panel and registers it for [`ImportWizardModel`] events
    pub fn attach(bus: &EventBus) -> Result<Arc<Self>, BusError> {
        let panel = Arc::new(Self::default());
        let listener: ListenerRef<ImportWizardModel> = panel.clone();
        bus.register(listener)?;
        info!(bus = %bus.name(), "Import progress panel attached");
        Ok(panel)
    }

    pub fn import_wizard_model(&self) -> Option<ImportWizardModel> {
        self.model.lock().clone()
    }
}

impl EventListener<ImportWizardModel> for ImportProgressPanel {
    fn on_event(&self, event: &EventObject<ImportWizardModel>) -> Result<(), ListenerError> {
        *self.model.lock() = Some(event.source().clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "ImportProgressPanel"
    }
}

/// Tracks the most recent navigation request, e.g. to enable wizard buttons
///
/// Counts every update so callers can tell a repeated state from a stale one.
#[derive(Default)]
pub struct NavigationTracker {
    state: Mutex<Option<NavigationEventState>>,
    updates: AtomicU64,
}

impl NavigationTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> Option<NavigationEventState> {
        *self.state.lock()
    }

    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Handle for registering this tracker on a bus
    pub fn listener(self: &Arc<Self>) -> ListenerRef<NavigationEventState> {
        self.clone()
    }
}

impl EventListener<NavigationEventState> for NavigationTracker {
    fn on_event(&self, event: &EventObject<NavigationEventState>) -> Result<(), ListenerError> {
        *self.state.lock() = Some(*event.source());
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "NavigationTracker"
    }
}

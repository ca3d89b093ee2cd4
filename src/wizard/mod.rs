// Import wizard components wired through the event bus
//
// The wizard page publishes its model and navigation requests; progress and
// button-state components listen without holding a reference to the page.

// Public API - what other modules can use
pub use models::{ImportWizardModel, NavigationEventState};
pub use panels::{ImportProgressPanel, ImportWizardPanel, NavigationTracker};

// Internal modules
pub mod models;
mod panels;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::impl_event;

/// Navigation requests emitted by wizard buttons
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationEventState {
    Cancel,
    Finish,
    Next,
    Previous,
    Reset,
    Update,
    Validate,
}

/// State shared by the import wizard's pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWizardModel {
    pub bundle_app_name: String,
    pub import_path: Option<String>, // Directory picked on the first page
}

impl ImportWizardModel {
    pub fn new(bundle_app_name: impl Into<String>) -> Self {
        Self {
            bundle_app_name: bundle_app_name.into(),
            import_path: None,
        }
    }

    pub fn with_import_path(mut self, path: impl Into<String>) -> Self {
        self.import_path = Some(path.into());
        self
    }
}

impl_event!(NavigationEventState, ImportWizardModel);

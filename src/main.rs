use eventbus::wizard::{
    ImportProgressPanel, ImportWizardModel, ImportWizardPanel, NavigationEventState,
    NavigationTracker,
};
use eventbus::{BusConfig, BusError, EventBus};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), BusError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventbus=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BusConfig::from_env()?;
    info!(name = %config.name, dispatch = %config.dispatch, "Starting import wizard demo");

    // The bus is built here and handed to every component that needs it
    let bus = EventBus::with_config(config);

    let progress = ImportProgressPanel::attach(&bus)?;
    let buttons = NavigationTracker::new();
    bus.register(buttons.listener())?;

    let wizard = Arc::new(ImportWizardPanel::new(bus.clone()));
    wizard.fire_new_event()?;

    // Several pages publish at once; each post is delivered on its own task
    let mut pages = Vec::new();
    for (page, state) in [
        NavigationEventState::Next,
        NavigationEventState::Validate,
        NavigationEventState::Update,
    ]
    .into_iter()
    .enumerate()
    {
        let bus = bus.clone();
        pages.push(tokio::spawn(async move {
            let model = ImportWizardModel::new(format!("bundle-{page}"));
            bus.post(model).and_then(|_| bus.post(state))
        }));
    }

    for page in pages {
        match page.await {
            Ok(result) => result?,
            Err(e) => error!(error = %e, "Page task failed"),
        }
    }

    wizard.navigate(NavigationEventState::Finish)?;

    info!(
        model = ?progress.import_wizard_model(),
        navigation = ?buttons.state(),
        navigation_updates = buttons.updates(),
        sources = ?bus.keys(),
        "Import wizard demo finished"
    );

    Ok(())
}

use droidmon_collector::registry::ProviderRegistry;
use std::sync::Arc;

/// Shared handler state: the provider registry built at startup.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
}

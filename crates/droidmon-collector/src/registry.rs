use crate::cpu::CpuProvider;
use crate::display::DisplayProvider;
use crate::identity::IdentityProvider;
use crate::memory::MemoryProvider;
use crate::platform::Platform;
use crate::power::PowerProvider;
use crate::storage::StorageProvider;
use crate::Provider;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Ordered set of active providers, invoked once per scrape.
///
/// Built once at startup and handed to the HTTP state; there is no
/// ambient global registry, so tests can assemble their own.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// The standard provider set, in exposition order.
    pub fn with_defaults(platform: Arc<dyn Platform>, storage_path: &str) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(IdentityProvider::new(platform.as_ref())));
        registry.register(Box::new(PowerProvider::new(platform.clone())));
        registry.register(Box::new(DisplayProvider::new(platform.clone())));
        registry.register(Box::new(MemoryProvider::new(platform.clone())));
        registry.register(Box::new(StorageProvider::new(
            platform.clone(),
            storage_path,
        )));
        registry.register(Box::new(CpuProvider::new(platform)));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run one collection pass over every provider in registration order.
    ///
    /// A failing provider contributes zero readings and is logged; the
    /// remaining providers still run, so one unavailable subsystem never
    /// aborts the scrape.
    pub fn collect(&self) -> Vec<MetricReading> {
        let mut snapshot = Vec::new();
        for provider in &self.providers {
            match provider.sample() {
                Ok(readings) => snapshot.extend(readings),
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "Provider sampling failed");
                }
            }
        }
        snapshot
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

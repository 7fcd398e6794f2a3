//! Metric providers for the droidmon exporter.
//!
//! Each [`Provider`] implementation samples one host subsystem (power,
//! display, memory, storage, CPU, identity) through the injected
//! [`platform::Platform`] abstraction and returns a vector of
//! [`MetricReading`]s. The [`registry::ProviderRegistry`] invokes every
//! provider once per scrape.

pub mod cpu;
pub mod display;
pub mod identity;
pub mod memory;
pub mod platform;
pub mod power;
pub mod registry;
pub mod storage;

use anyhow::Result;
use droidmon_common::MetricReading;

/// A single-subsystem metric sampler.
///
/// Providers are constructed once at startup and sampled once per incoming
/// scrape. Concurrent scrapes each run their own collection pass, so
/// `sample` takes `&self` and the trait requires `Send + Sync`; any
/// resource handle must be acquired and released within one call.
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g., `"power"`, `"cpu"`), used for
    /// logging when sampling fails.
    fn name(&self) -> &str;

    /// Samples current values for this subsystem.
    ///
    /// A provider is atomic per pass: it returns either all of its
    /// readings or an error, never a partial set.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform query fails.
    fn sample(&self) -> Result<Vec<MetricReading>>;
}

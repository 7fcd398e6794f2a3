use crate::platform::Platform;
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Samples total and available memory.
pub struct MemoryProvider {
    platform: Arc<dyn Platform>,
}

impl MemoryProvider {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        let mem = self.platform.memory()?;
        Ok(vec![
            MetricReading::new("android_memory_available_bytes", mem.available_bytes as f64),
            MetricReading::new("android_memory_total_bytes", mem.total_bytes as f64),
        ])
    }
}

use crate::platform::Platform;
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Samples the primary data partition.
pub struct StorageProvider {
    platform: Arc<dyn Platform>,
    path: String,
}

impl StorageProvider {
    pub fn new(platform: Arc<dyn Platform>, path: impl Into<String>) -> Self {
        Self {
            platform,
            path: path.into(),
        }
    }
}

impl Provider for StorageProvider {
    fn name(&self) -> &str {
        "storage"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        let stats = self.platform.storage(&self.path)?;
        Ok(vec![
            MetricReading::new("android_storage_total_bytes", stats.total_bytes as f64),
            MetricReading::new("android_storage_free_bytes", stats.free_bytes as f64),
            MetricReading::new(
                "android_storage_available_bytes",
                stats.available_bytes as f64,
            ),
        ])
    }
}

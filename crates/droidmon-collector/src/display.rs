use crate::platform::Platform;
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Samples the display power state.
pub struct DisplayProvider {
    platform: Arc<dyn Platform>,
}

impl DisplayProvider {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }
}

impl Provider for DisplayProvider {
    fn name(&self) -> &str {
        "display"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        let on = self.platform.screen_on()?;
        Ok(vec![MetricReading::new(
            "android_screen_on",
            if on { 1.0 } else { 0.0 },
        )])
    }
}

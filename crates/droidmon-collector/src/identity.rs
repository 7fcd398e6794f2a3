use crate::platform::Platform;
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;

/// Emits `android_up 1` with device model and OS version labels.
///
/// The platform is queried once at construction and the values cached, so
/// this provider never fails at scrape time; a failed query falls back to
/// `"unknown"`.
pub struct IdentityProvider {
    model: String,
    os_version: String,
}

impl IdentityProvider {
    pub fn new(platform: &dyn Platform) -> Self {
        match platform.device() {
            Ok(info) => Self {
                model: info.model,
                os_version: info.os_version,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Device identity unavailable, using fallback labels");
                Self {
                    model: "unknown".to_string(),
                    os_version: "unknown".to_string(),
                }
            }
        }
    }
}

impl Provider for IdentityProvider {
    fn name(&self) -> &str {
        "identity"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        Ok(vec![MetricReading::new("android_up", 1.0)
            .with_label("model", self.model.clone())
            .with_label("os_version", self.os_version.clone())])
    }
}

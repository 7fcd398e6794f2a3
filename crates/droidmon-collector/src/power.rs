use crate::platform::{ChargeStatus, Platform};
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Samples battery charge, charging state, and power source.
pub struct PowerProvider {
    platform: Arc<dyn Platform>,
}

impl PowerProvider {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }
}

impl Provider for PowerProvider {
    fn name(&self) -> &str {
        "power"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        let battery = self.platform.battery()?;

        let charging = matches!(
            battery.status,
            ChargeStatus::Charging | ChargeStatus::Full
        );

        Ok(vec![
            MetricReading::new("android_battery_percent", f64::from(battery.percent)),
            MetricReading::new("android_charging", if charging { 1.0 } else { 0.0 }),
            MetricReading::new("android_power_source", 1.0)
                .with_label("type", battery.plug.as_str()),
        ])
    }
}

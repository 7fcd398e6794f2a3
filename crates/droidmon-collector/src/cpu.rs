use crate::platform::Platform;
use crate::Provider;
use anyhow::Result;
use droidmon_common::MetricReading;
use std::sync::Arc;

/// Samples aggregate CPU usage from a single `/proc/stat` read.
///
/// Usage is `100 * (total - idle) / total` over the cumulative time-slice
/// counters, where `total` sums every counter field and `idle` is the
/// counter at slice index 4. An unreadable line or a zero total degrades
/// to a 0 reading instead of failing the scrape.
pub struct CpuProvider {
    platform: Arc<dyn Platform>,
}

impl CpuProvider {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }
}

/// Parse an aggregate cpu line into `(total, idle)` tick counts.
///
/// Returns `None` when the line is not a cpu line or holds no counters.
pub fn parse_cpu_line(line: &str) -> Option<(u64, u64)> {
    let mut tokens = line.split_whitespace();
    if !tokens.next()?.starts_with("cpu") {
        return None;
    }
    let counters: Vec<u64> = tokens.map_while(|t| t.parse().ok()).collect();
    if counters.is_empty() {
        return None;
    }
    let total: u64 = counters.iter().sum();
    let idle = counters.get(4).copied().unwrap_or(0);
    Some((total, idle))
}

/// Usage percentage for the given tick counts; 0 when `total` is 0.
pub fn usage_percent(total: u64, idle: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * (total.saturating_sub(idle)) as f64 / total as f64
}

impl Provider for CpuProvider {
    fn name(&self) -> &str {
        "cpu"
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        let usage = match self.platform.cpu_line() {
            Ok(line) => parse_cpu_line(&line)
                .map(|(total, idle)| usage_percent(total, idle))
                .unwrap_or(0.0),
            Err(e) => {
                tracing::warn!(error = %e, "CPU counters unreadable, reporting 0");
                0.0
            }
        };
        Ok(vec![MetricReading::new("android_cpu_usage_percent", usage)])
    }
}

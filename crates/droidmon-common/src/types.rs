use serde::{Deserialize, Serialize};

/// A single sampled metric value, ready for exposition.
///
/// Labels are kept as an ordered list rather than a map: the exposition
/// encoder emits them in insertion order, and keys are unique within one
/// reading (enforced by [`MetricReading::with_label`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl MetricReading {
    /// Create a reading with no labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use droidmon_common::MetricReading;
    ///
    /// let r = MetricReading::new("android_screen_on", 1.0);
    /// assert_eq!(r.name, "android_screen_on");
    /// assert!(r.labels.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            value,
        }
    }

    /// Attach a label, replacing any existing label with the same key so
    /// that keys stay unique within the reading.
    ///
    /// # Examples
    ///
    /// ```
    /// use droidmon_common::MetricReading;
    ///
    /// let r = MetricReading::new("android_power_source", 1.0)
    ///     .with_label("type", "usb")
    ///     .with_label("type", "ac");
    /// assert_eq!(r.labels, vec![("type".to_string(), "ac".to_string())]);
    /// ```
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.labels.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.labels.push((key, value));
        }
        self
    }
}

/// Whether `name` is a legal exposition metric name
/// (`[a-zA-Z_][a-zA-Z0-9_]*`).
///
/// # Examples
///
/// ```
/// use droidmon_common::types::is_valid_metric_name;
///
/// assert!(is_valid_metric_name("android_battery_percent"));
/// assert!(!is_valid_metric_name(""));
/// assert!(!is_valid_metric_name("9lives"));
/// assert!(!is_valid_metric_name("bad-name"));
/// ```
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

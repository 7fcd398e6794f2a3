pub mod types;

pub use types::MetricReading;

//! droidmon-exporter — serves host metrics over HTTP.
//!
//! Each `GET /metrics` runs one synchronous collection pass over the
//! provider registry and renders the snapshot in the Prometheus text
//! exposition format. There is no background polling and no caching;
//! concurrent scrapes each collect independently.

pub mod app;
pub mod config;
pub mod expfmt;
pub mod logging;
pub mod state;

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use droidmon_collector::registry::ProviderRegistry;
use droidmon_collector::Provider;
use droidmon_common::MetricReading;
use droidmon_exporter::app;
use droidmon_exporter::state::AppState;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Provider double that returns the same readings on every pass.
pub struct StaticProvider {
    pub name: &'static str,
    pub readings: Vec<MetricReading>,
}

impl Provider for StaticProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        Ok(self.readings.clone())
    }
}

/// Provider double that always fails.
pub struct FailingProvider {
    pub name: &'static str,
}

impl Provider for FailingProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn sample(&self) -> Result<Vec<MetricReading>> {
        Err(anyhow!("simulated {} outage", self.name))
    }
}

pub fn build_test_app(providers: Vec<Box<dyn Provider>>) -> axum::Router {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry.register(provider);
    }
    app::build_http_app(AppState {
        registry: Arc::new(registry),
    })
}

/// A representative healthy provider set.
pub fn healthy_providers() -> Vec<Box<dyn Provider>> {
    vec![
        Box::new(StaticProvider {
            name: "identity",
            readings: vec![MetricReading::new("android_up", 1.0)
                .with_label("model", "Pixel 8")
                .with_label("os_version", "15")],
        }),
        Box::new(StaticProvider {
            name: "power",
            readings: vec![
                MetricReading::new("android_battery_percent", 87.0),
                MetricReading::new("android_charging", 1.0),
                MetricReading::new("android_power_source", 1.0).with_label("type", "usb"),
            ],
        }),
        Box::new(StaticProvider {
            name: "memory",
            readings: vec![
                MetricReading::new("android_memory_available_bytes", 3e9),
                MetricReading::new("android_memory_total_bytes", 8e9),
            ],
        }),
        Box::new(StaticProvider {
            name: "cpu",
            readings: vec![MetricReading::new(
                "android_cpu_usage_percent",
                100.0 * 100.0 / 150.0,
            )],
        }),
    ]
}

pub async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
) -> (StatusCode, Option<String>, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should not fail at the transport level");

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    (
        status,
        content_type,
        String::from_utf8(body.to_vec()).expect("body should be utf-8"),
    )
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    request(app, "GET", uri).await
}

/// Assert every line is a structurally valid exposition line.
pub fn assert_valid_exposition(body: &str) {
    assert!(body.is_empty() || body.ends_with('\n'), "missing trailing newline");
    for line in body.lines() {
        assert!(!line.is_empty(), "blank line in exposition body");
        let (head, value) = line
            .rsplit_once(' ')
            .unwrap_or_else(|| panic!("no value separator in line: {line}"));
        assert!(
            value.parse::<f64>().is_ok(),
            "unparseable value in line: {line}"
        );
        assert!(!head.is_empty(), "empty metric name in line: {line}");
    }
}

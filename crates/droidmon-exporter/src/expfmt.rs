//! Prometheus text exposition format.
//!
//! Renders a snapshot of metric readings as `name{labels} value` lines
//! for scraping by a Prometheus server or compatible agent.

use droidmon_common::types::is_valid_metric_name;
use droidmon_common::MetricReading;

/// Content type served for exposition bodies.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Render a snapshot into exposition text, one line per reading in
/// snapshot order, terminated by a trailing newline.
///
/// Readings with an invalid name or a non-finite value are dropped with a
/// warning instead of corrupting the rest of the response.
pub fn encode(snapshot: &[MetricReading]) -> String {
    let mut out = String::new();
    for reading in snapshot {
        if !is_valid_metric_name(&reading.name) {
            tracing::warn!(name = %reading.name, "Dropping reading with invalid metric name");
            continue;
        }
        if !reading.value.is_finite() {
            tracing::warn!(name = %reading.name, "Dropping reading with non-finite value");
            continue;
        }

        out.push_str(&reading.name);
        if !reading.labels.is_empty() {
            out.push('{');
            for (i, (key, value)) in reading.labels.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape_label_value(value));
                out.push('"');
            }
            out.push('}');
        }
        out.push(' ');
        out.push_str(&format_value(reading.value));
        out.push('\n');
    }
    out
}

/// Escape a label value for embedding between double quotes:
/// backslash, quote, and newline are backslash-escaped.
pub fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

// Largest integer range f64 represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Integral values render without a decimal point; everything else uses
/// `f64`'s shortest round-trip representation.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reading_without_labels() {
        let snapshot = vec![MetricReading::new("android_screen_on", 1.0)];
        assert_eq!(encode(&snapshot), "android_screen_on 1\n");
    }

    #[test]
    fn encodes_labels_in_insertion_order() {
        let snapshot = vec![MetricReading::new("android_up", 1.0)
            .with_label("model", "Pixel 8")
            .with_label("os_version", "15")];
        assert_eq!(
            encode(&snapshot),
            "android_up{model=\"Pixel 8\",os_version=\"15\"} 1\n"
        );
    }

    #[test]
    fn escapes_quotes_backslashes_and_newlines() {
        assert_eq!(escape_label_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_label_value(r"C:\data"), r"C:\\data");
        assert_eq!(escape_label_value("line1\nline2"), "line1\\nline2");

        let snapshot = vec![MetricReading::new("android_power_source", 1.0)
            .with_label("type", "us\"b\\\n")];
        assert_eq!(
            encode(&snapshot),
            "android_power_source{type=\"us\\\"b\\\\\\n\"} 1\n"
        );
    }

    #[test]
    fn integers_render_without_decimal_point() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(87.0), "87");
        assert_eq!(format_value(128_000_000_000.0), "128000000000");
    }

    #[test]
    fn floats_round_trip() {
        let v = 100.0 * 100.0 / 150.0;
        let rendered = format_value(v);
        let parsed: f64 = rendered.parse().expect("rendered float should parse");
        assert_eq!(parsed, v);
    }

    #[test]
    fn drops_malformed_readings_but_keeps_the_rest() {
        let snapshot = vec![
            MetricReading::new("", 1.0),
            MetricReading::new("bad-name", 1.0),
            MetricReading::new("android_charging", f64::NAN),
            MetricReading::new("android_screen_on", 0.0),
        ];
        assert_eq!(encode(&snapshot), "android_screen_on 0\n");
    }

    #[test]
    fn output_has_trailing_newline_and_no_blank_lines() {
        let snapshot = vec![
            MetricReading::new("android_memory_total_bytes", 8e9),
            MetricReading::new("android_memory_available_bytes", 3e9),
        ];
        let body = encode(&snapshot);
        assert!(body.ends_with('\n'));
        assert!(!body.contains("\n\n"));
        assert_eq!(body.lines().count(), 2);
    }

    // Minimal exposition parser for the round-trip property.
    fn parse_line(line: &str) -> (String, Vec<(String, String)>, f64) {
        let (head, value) = line.rsplit_once(' ').expect("line should have a value");
        let value: f64 = value.parse().expect("value should parse");
        match head.split_once('{') {
            None => (head.to_string(), vec![], value),
            Some((name, rest)) => {
                let rest = rest.strip_suffix('}').expect("labels should close");
                let mut labels = Vec::new();
                let mut chars = rest.chars().peekable();
                while chars.peek().is_some() {
                    let key: String = chars.by_ref().take_while(|&c| c != '=').collect();
                    assert_eq!(chars.next(), Some('"'));
                    let mut val = String::new();
                    loop {
                        match chars.next().expect("unterminated label value") {
                            '\\' => match chars.next() {
                                Some('n') => val.push('\n'),
                                Some(c) => val.push(c),
                                None => panic!("dangling escape"),
                            },
                            '"' => break,
                            c => val.push(c),
                        }
                    }
                    labels.push((key, val));
                    if chars.peek() == Some(&',') {
                        chars.next();
                    }
                }
                (name.to_string(), labels, value)
            }
        }
    }

    #[test]
    fn round_trip_recovers_name_labels_and_value() {
        let original = MetricReading::new("android_power_source", 1.0)
            .with_label("type", "usb")
            .with_label("note", "odd \"value\" with \\ and\nnewline");
        let body = encode(&[original.clone()]);
        let (name, labels, value) = parse_line(body.trim_end());
        assert_eq!(name, original.name);
        assert_eq!(labels, original.labels);
        assert_eq!(value, original.value);
    }
}

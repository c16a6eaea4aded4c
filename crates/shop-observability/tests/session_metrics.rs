//! Session metrics as the CLI records them.

use shop_observability::{LogFormat, LogLevel, MetricsCollector, SessionMetrics};

#[test]
fn cli_session_round_trips_through_json() {
    let mut metrics = MetricsCollector::new("cart");
    let products = metrics.time("load_catalog", || vec!["1", "2", "3"]);
    metrics.record_count("products", products.len() as u64);
    metrics.start_step("build_cart");
    metrics.finish_step("build_cart");
    metrics.time("price", || ());
    metrics.record_count("lines", 2);

    let session = metrics.finalize();
    let parsed: SessionMetrics = serde_json::from_str(&session.to_json_pretty()).unwrap();

    assert_eq!(parsed.command, "cart");
    let steps: Vec<&str> = parsed.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(steps, vec!["load_catalog", "build_cart", "price"]);
    assert_eq!(parsed.counts.get("products"), Some(&3));
    assert_eq!(parsed.counts.get("lines"), Some(&2));
}

#[test]
fn repeated_step_names_are_kept_separately() {
    let mut metrics = MetricsCollector::new("products");
    metrics.time("query", || ());
    metrics.time("query", || ());
    let session = metrics.finalize();
    assert_eq!(session.steps.len(), 2);
}

#[test]
fn logging_settings_parse_from_config_strings() {
    let level: LogLevel = "info".parse().unwrap();
    let format: LogFormat = "json".parse().unwrap();
    assert_eq!((level, format), (LogLevel::Info, LogFormat::Json));
    assert!("verbose".parse::<LogLevel>().is_err());
}

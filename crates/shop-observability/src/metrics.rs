//! Session-level timing metrics.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Metrics for one CLI session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Command that ran.
    pub command: String,
    /// Step timings, in the order the steps started.
    pub steps: Vec<StepMetrics>,
    /// Named counts (products loaded, products visible, ...).
    pub counts: BTreeMap<String, u64>,
    /// Total session duration (microseconds).
    pub total_duration_us: u64,
}

/// Timing for a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Step name.
    pub name: String,
    /// Time from session start to step start (microseconds).
    pub start_us: u64,
    /// Step duration (microseconds).
    pub duration_us: u64,
}

/// Collector for session metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    command: String,
    start: Instant,
    steps: Vec<StepBuilder>,
    counts: BTreeMap<String, u64>,
}

#[derive(Debug)]
struct StepBuilder {
    name: String,
    start: Instant,
    end: Option<Instant>,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
            steps: Vec::new(),
            counts: BTreeMap::new(),
        }
    }

    /// Record step start.
    pub fn start_step(&mut self, name: &str) {
        self.steps.push(StepBuilder {
            name: name.to_string(),
            start: Instant::now(),
            end: None,
        });
    }

    /// Record the end of the most recent open step called `name`.
    ///
    /// A step that was never started is recorded with zero duration.
    pub fn finish_step(&mut self, name: &str) {
        let now = Instant::now();
        match self
            .steps
            .iter_mut()
            .rev()
            .find(|step| step.name == name && step.end.is_none())
        {
            Some(step) => step.end = Some(now),
            None => self.steps.push(StepBuilder {
                name: name.to_string(),
                start: now,
                end: Some(now),
            }),
        }
    }

    /// Run `f` as a step.
    pub fn time<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> R {
        self.start_step(name);
        let result = f();
        self.finish_step(name);
        result
    }

    /// Set a named count.
    pub fn record_count(&mut self, name: &str, value: u64) {
        self.counts.insert(name.to_string(), value);
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics. Open steps end now.
    pub fn finalize(self) -> SessionMetrics {
        let now = Instant::now();
        let start = self.start;

        let steps = self
            .steps
            .into_iter()
            .map(|step| {
                let end = step.end.unwrap_or(now);
                StepMetrics {
                    name: step.name,
                    start_us: micros(step.start.duration_since(start)),
                    duration_us: micros(end.duration_since(step.start)),
                }
            })
            .collect();

        SessionMetrics {
            command: self.command,
            steps,
            counts: self.counts,
            total_duration_us: micros(now.duration_since(start)),
        }
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

impl SessionMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as JSON (pretty printed).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Look up a step by name.
    pub fn step(&self, name: &str) -> Option<&StepMetrics> {
        self.steps.iter().find(|step| step.name == name)
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Session: {} ({}us, {:.2}ms)",
            self.command,
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        if !self.steps.is_empty() {
            lines.push("  Steps:".to_string());
            for step in &self.steps {
                lines.push(format!(
                    "    {}: {}us ({:.2}ms)",
                    step.name,
                    step.duration_us,
                    step.duration_us as f64 / 1000.0
                ));
            }
        }

        if !self.counts.is_empty() {
            lines.push("  Counts:".to_string());
            for (name, value) in &self.counts {
                lines.push(format!("    {}: {}", name, value));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_keep_start_order() {
        let mut metrics = MetricsCollector::new("products");
        metrics.start_step("load");
        metrics.finish_step("load");
        let visible = metrics.time("query", || 3);
        metrics.record_count("visible", visible);

        let session = metrics.finalize();
        let names: Vec<&str> = session.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["load", "query"]);
        assert_eq!(session.counts.get("visible"), Some(&3));
        assert!(session.step("query").unwrap().start_us >= session.step("load").unwrap().start_us);
    }

    #[test]
    fn test_unstarted_step_is_recorded() {
        let mut metrics = MetricsCollector::new("facets");
        metrics.finish_step("render");
        let session = metrics.finalize();
        assert_eq!(session.step("render").unwrap().duration_us, 0);
    }

    #[test]
    fn test_open_step_closed_on_finalize() {
        let mut metrics = MetricsCollector::new("cart");
        metrics.start_step("price");
        let session = metrics.finalize();
        assert!(session.step("price").is_some());
        assert!(session.total_duration_us >= session.step("price").unwrap().duration_us);
    }

    #[test]
    fn test_summary_and_json() {
        let mut metrics = MetricsCollector::new("products");
        metrics.time("load", || ());
        metrics.record_count("products", 6);
        let session = metrics.finalize();

        let summary = session.to_summary();
        assert!(summary.starts_with("Session: products"));
        assert!(summary.contains("    load: "));
        assert!(summary.contains("    products: 6"));

        let json: serde_json::Value = serde_json::from_str(&session.to_json()).unwrap();
        assert_eq!(json["command"], "products");
        assert_eq!(json["counts"]["products"], 6);
    }
}

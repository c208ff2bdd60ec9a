use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Prosess-globale tellere for plan-motoren og lagringen.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub sessions_generated_total: IntCounter,
    pub log_load_fallback_total: IntCounter,
    pub log_entries_skipped_total: IntCounter,
    pub log_writes_total: IntCounter,
    pub telemetry_records_skipped_total: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    // navnene er konstanter under → kan ikke feile
    let c = IntCounter::new(name, help).expect("valid metric name");
    if let Err(e) = registry.register(Box::new(c.clone())) {
        log::warn!("kunne ikke registrere metric {name}: {e}");
    }
    c
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            sessions_generated_total: counter(
                &registry,
                "runplan_sessions_generated_total",
                "Session records produced by session expansion",
            ),
            log_load_fallback_total: counter(
                &registry,
                "runplan_log_load_fallback_total",
                "Log loads that fell back to an empty log book",
            ),
            log_entries_skipped_total: counter(
                &registry,
                "runplan_log_entries_skipped_total",
                "Weekly log entries that could not be parsed",
            ),
            log_writes_total: counter(
                &registry,
                "runplan_log_writes_total",
                "Successful writes of the training log file",
            ),
            telemetry_records_skipped_total: counter(
                &registry,
                "runplan_telemetry_records_skipped_total",
                "Telemetry records that could not be parsed",
            ),
            registry,
        }
    }

    /// Prometheus tekstformat.
    pub fn gather_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            log::warn!("metrics-encoding feilet: {e}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

pub fn global() -> &'static Metrics {
    &METRICS
}

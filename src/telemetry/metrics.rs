use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Telemetry {
    pub messages_listed: IntCounter,
    pub messages_fetched: IntCounter,
    pub messages_added: IntCounter,
    pub messages_deleted: IntCounter,
    pub lookups_missed: IntCounter,
    pub backend_errors: IntCounter,
    pub request_hist: Histogram,
    pub registry: Registry,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    // names are static and unique, so neither call can fail
    let c = IntCounter::with_opts(Opts::new(name, help)).expect("valid counter opts");
    registry.register(Box::new(c.clone())).ok();
    c
}

impl Telemetry {
    pub fn new() -> Self {
        let registry = Registry::new();

        let messages_listed = counter(&registry, "messages_listed_total", "List requests served");
        let messages_fetched = counter(&registry, "messages_fetched_total", "Messages returned by id");
        let messages_added = counter(&registry, "messages_added_total", "Messages created");
        let messages_deleted = counter(&registry, "messages_deleted_total", "Messages removed");
        let lookups_missed = counter(&registry, "lookups_missed_total", "Get or delete requests for an unknown id");
        let backend_errors = counter(&registry, "backend_errors_total", "Requests failed by the persistence backend");
        let request_hist = Histogram::with_opts(HistogramOpts::new("request_seconds", "Message API request duration"))
            .expect("valid histogram opts");
        registry.register(Box::new(request_hist.clone())).ok();

        Telemetry {
            messages_listed,
            messages_fetched,
            messages_added,
            messages_deleted,
            lookups_missed,
            backend_errors,
            request_hist,
            registry,
        }
    }

    /// Gather metrics in Prometheus text format.
    pub fn gather(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        let mf = self.registry.gather();
        encoder.encode(&mf, &mut buffer).unwrap_or_default();
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_contains_metric_names() {
        let t = Telemetry::new();
        t.messages_added.inc();
        t.request_hist.observe(0.01);
        let out = t.gather();
        assert!(out.contains("messages_added_total 1"), "gather output should contain counter value");
        assert!(out.contains("request_seconds"));
    }

    #[test]
    fn instances_do_not_share_counts() {
        let a = Telemetry::new();
        let b = Telemetry::new();
        a.lookups_missed.inc();
        assert_eq!(a.lookups_missed.get(), 1);
        assert_eq!(b.lookups_missed.get(), 0);
    }
}

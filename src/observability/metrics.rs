use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Identity exchange metrics
    pub identity_exchange_requests: IntCounterVec,
    pub identity_exchange_failures: IntCounterVec,
    pub identity_exchange_duration: HistogramVec,

    // Cache metrics
    pub cache_hits: IntCounter,
    pub token_expiry_unix: IntGauge,

    // Config/runtime
    pub parse_failures: IntCounter,
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("keystoneauth".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Identity exchange
            identity_exchange_requests: IntCounterVec::new(Opts::new("identity_exchange_requests_total", "Identity exchange attempts by trigger"), &["trigger"]).unwrap(),
            identity_exchange_failures: IntCounterVec::new(Opts::new("identity_exchange_failures_total", "Identity exchange failures by reason"), &["reason"]).unwrap(),
            identity_exchange_duration: HistogramVec::new(HistogramOpts::new("identity_exchange_duration_seconds", "Identity exchange duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["outcome"]).unwrap(),

            // Cache
            cache_hits: IntCounter::new("token_cache_hits_total", "authenticate() calls served from cache").unwrap(),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Cached token expiry timestamp").unwrap(),

            // Config/runtime
            parse_failures: IntCounter::new("config_parse_failures_total", "Config parse failures").unwrap(),
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.identity_exchange_requests.clone())).unwrap();
        reg.register(Box::new(metrics.identity_exchange_failures.clone())).unwrap();
        reg.register(Box::new(metrics.identity_exchange_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.parse_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }

    /// Prometheus text exposition of the registry
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

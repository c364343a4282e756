use metrics_exporter_prometheus::PrometheusHandle;
use review_feed::config::ReviewSourceConfig;
use review_feed::extract::ExtractorOptions;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Per-deployment extraction defaults; each request builds its own extractor from these.
#[derive(Debug, Clone)]
pub(crate) struct FeedSettings {
    pub(crate) fallback_location: String,
}

impl FeedSettings {
    pub(crate) fn from_config(config: &ReviewSourceConfig) -> Self {
        Self {
            fallback_location: config.fallback_location.clone(),
        }
    }

    pub(crate) fn extractor_options(&self, diagnostics: bool) -> ExtractorOptions {
        ExtractorOptions {
            fallback_location: self.fallback_location.clone(),
            ..ExtractorOptions::default()
        }
        .with_diagnostics(diagnostics)
    }
}

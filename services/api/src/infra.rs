use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::config::StoreConfig;
use receipt_points::receipts::{InMemoryPointsRepository, ReceiptPointsService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the single points store for the process and the service sharing it.
pub(crate) fn points_service(
    config: &StoreConfig,
) -> Arc<ReceiptPointsService<InMemoryPointsRepository>> {
    let repository = Arc::new(InMemoryPointsRepository::default());
    Arc::new(ReceiptPointsService::new(repository).with_latency(config.simulated_latency))
}

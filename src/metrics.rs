//! Prometheus metrics for catalog mutations and searches.
//!
//! The recorder is installed once per process by [`init_metrics`]; until then
//! every recording call is a no-op, which keeps tests free of global state.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const RECORDS_CREATED: &str = "fyyur_records_created_total";
pub const RECORDS_UPDATED: &str = "fyyur_records_updated_total";
pub const RECORDS_DELETED: &str = "fyyur_records_deleted_total";
pub const MUTATION_FAILURES: &str = "fyyur_mutation_failures_total";
pub const SEARCHES: &str = "fyyur_searches_total";
pub const SEARCH_RESULTS: &str = "fyyur_search_results";

/// Install the Prometheus recorder. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("METRICS: handle already stored");
            }
            describe_all();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

fn describe_all() {
    metrics::describe_counter!(RECORDS_CREATED, "Venues, artists and shows created");
    metrics::describe_counter!(RECORDS_UPDATED, "Venues and artists edited");
    metrics::describe_counter!(RECORDS_DELETED, "Venues and artists deleted");
    metrics::describe_counter!(MUTATION_FAILURES, "Create/update/delete calls that failed");
    metrics::describe_counter!(SEARCHES, "Name searches served");
    metrics::describe_histogram!(SEARCH_RESULTS, "Number of hits per name search");
}

/// Prometheus text exposition, empty when the recorder is not installed.
pub fn render() -> String {
    HANDLE.get().map(|h| h.render()).unwrap_or_default()
}

/// Recording helpers used by the route handlers.
pub struct CatalogMetrics;

impl CatalogMetrics {
    pub fn record_created(entity: &'static str) {
        metrics::counter!(RECORDS_CREATED, "entity" => entity).increment(1);
    }

    pub fn record_updated(entity: &'static str) {
        metrics::counter!(RECORDS_UPDATED, "entity" => entity).increment(1);
    }

    pub fn record_deleted(entity: &'static str) {
        metrics::counter!(RECORDS_DELETED, "entity" => entity).increment(1);
    }

    pub fn record_failure(entity: &'static str, op: &'static str) {
        metrics::counter!(MUTATION_FAILURES, "entity" => entity, "op" => op).increment(1);
    }

    pub fn record_search(entity: &'static str, hits: usize) {
        metrics::counter!(SEARCHES, "entity" => entity).increment(1);
        metrics::histogram!(SEARCH_RESULTS, "entity" => entity).record(hits as f64);
    }
}

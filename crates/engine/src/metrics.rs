use lazy_static::lazy_static;
use prometheus::{register_int_counter_with_registry, Encoder, IntCounter, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref SESSIONS_CREATED_TOTAL: IntCounter = register_int_counter_with_registry!(
        "regflow_sessions_created_total",
        "Total number of assessment sessions created.",
        REGISTRY
    )
    .unwrap();
    pub static ref SESSIONS_EXPIRED_TOTAL: IntCounter = register_int_counter_with_registry!(
        "regflow_sessions_expired_total",
        "Total number of sessions evicted after the idle timeout.",
        REGISTRY
    )
    .unwrap();
    pub static ref TOOLS_EXECUTED_TOTAL: IntCounter = register_int_counter_with_registry!(
        "regflow_tools_executed_total",
        "Total number of tool results recorded.",
        REGISTRY
    )
    .unwrap();
    pub static ref DEPENDENCY_REJECTIONS_TOTAL: IntCounter = register_int_counter_with_registry!(
        "regflow_dependency_rejections_total",
        "Total number of tool executions rejected for unmet prerequisites.",
        REGISTRY
    )
    .unwrap();
}

/// Forces counter registration so `/metrics` lists them before first use.
pub fn register_metrics() {
    lazy_static::initialize(&SESSIONS_CREATED_TOTAL);
    lazy_static::initialize(&SESSIONS_EXPIRED_TOTAL);
    lazy_static::initialize(&TOOLS_EXECUTED_TOTAL);
    lazy_static::initialize(&DEPENDENCY_REJECTIONS_TOTAL);
}

/// Renders the registry in Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    // Encoding into a Vec cannot fail in practice.
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

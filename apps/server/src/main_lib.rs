use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use autofill_core::{
    audit::InMemoryAuditSink,
    autofill::{AutofillService, AutofillServiceTrait},
    cache::{InMemoryCacheStore, ResponseCache},
    config::InMemoryConfig,
    listings::InMemoryCertifiedFieldStore,
    providers::CapabilityResolver,
    telemetry::{CallMeter, InMemoryCallLog, LogAlertSink},
};

use crate::config::Config;

pub struct AppState {
    pub autofill_service: Arc<dyn AutofillServiceTrait>,
    pub call_log: Arc<InMemoryCallLog>,
}

pub fn init_tracing() {
    let log_format = std::env::var("AUTOFILL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn load_provider_config(config: &Config) -> anyhow::Result<InMemoryConfig> {
    let Some(path) = &config.providers_file else {
        tracing::warn!("AUTOFILL_PROVIDERS_FILE not set; all capabilities use mock providers");
        return Ok(InMemoryConfig::new());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read providers file {}", path.display()))?;
    let provider_config = InMemoryConfig::from_json(&raw)
        .with_context(|| format!("Invalid providers file {}", path.display()))?;
    tracing::info!(
        "Loaded {} provider registrations from {}",
        provider_config.registrations().len(),
        path.display()
    );
    Ok(provider_config)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider_config = Arc::new(load_provider_config(config)?);

    let call_log = Arc::new(InMemoryCallLog::new());
    let meter = Arc::new(CallMeter::new(call_log.clone(), Arc::new(LogAlertSink)));
    let resolver = Arc::new(CapabilityResolver::new(provider_config.clone(), meter));

    let cache = Arc::new(ResponseCache::new(
        Arc::new(InMemoryCacheStore::new()),
        provider_config.clone(),
    ));
    let autofill_service = Arc::new(AutofillService::new(
        resolver,
        cache,
        Arc::new(InMemoryCertifiedFieldStore::new()),
        Arc::new(InMemoryAuditSink::new()),
    ));

    Ok(Arc::new(AppState {
        autofill_service,
        call_log,
    }))
}

//! Call metering and sustained-failure detection.
//!
//! Consecutive failures are counted per provider key, not per capability.
//! The alert is edge-triggered: it fires on the call that moves a counter to
//! exactly the threshold, and only a success re-arms it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use autofill_vehicle_data::{Capability, ProviderError};

use super::alerts::{AlertDescriptor, AlertNotification, AlertSeverity, AlertSink};
use super::call_record_model::{CallLogStore, CallRecord, STATUS_FAILED, STATUS_OK};
use crate::constants::FAILURE_ALERT_THRESHOLD;

/// Alert name raised when a provider keeps failing.
pub const CONSECUTIVE_FAILURES_ALERT: &str = "provider_consecutive_failures";

/// Identifies the provider a metered call is attributed to.
#[derive(Clone, Debug, PartialEq)]
pub struct CallContext {
    pub capability: Capability,
    pub provider_key: String,
    pub cost_per_call: Decimal,
}

impl CallContext {
    pub fn new(capability: Capability, provider_key: impl Into<String>, cost_per_call: Decimal) -> Self {
        Self {
            capability,
            provider_key: provider_key.into(),
            cost_per_call,
        }
    }
}

/// Consecutive-failure state for one provider key.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureCounter {
    pub consecutive_failures: u32,
    pub last_success_at: Option<DateTime<Utc>>,
}

/// Wraps provider calls with call logging and failure alerting.
///
/// State is in-memory and process-wide; it resets on restart.
pub struct CallMeter {
    counters: Mutex<HashMap<String, FailureCounter>>,
    call_log: Arc<dyn CallLogStore>,
    alerts: Arc<dyn AlertSink>,
    threshold: u32,
}

impl CallMeter {
    pub fn new(call_log: Arc<dyn CallLogStore>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            call_log,
            alerts,
            threshold: FAILURE_ALERT_THRESHOLD,
        }
    }

    fn lock_counters(&self) -> MutexGuard<'_, HashMap<String, FailureCounter>> {
        self.counters.lock().unwrap_or_else(|poisoned| {
            warn!("Failure counter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Runs `call`, records its outcome and returns its result unchanged.
    pub async fn observe<T, F>(
        &self,
        ctx: &CallContext,
        endpoint: &str,
        call: F,
    ) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let started = Instant::now();
        let result = call.await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let (status_code, error) = match &result {
            Ok(_) => (STATUS_OK, None),
            Err(e) => (STATUS_FAILED, Some(e.to_string())),
        };

        let record = CallRecord {
            capability: ctx.capability,
            provider_key: ctx.provider_key.clone(),
            endpoint: endpoint.to_string(),
            status_code,
            latency_ms,
            cost: ctx.cost_per_call,
            error,
            created_at: Utc::now(),
        };

        if let Err(e) = self.call_log.append(&record).await {
            warn!(
                "Failed to write call record for '{}': {}",
                ctx.provider_key, e
            );
        }

        if self.record_status(&ctx.provider_key, status_code) {
            self.raise_alert(ctx).await;
        }

        result
    }

    /// Applies one call outcome to the provider's counter.
    ///
    /// Returns true when this outcome moved the counter to exactly the
    /// threshold, i.e. when an alert must be raised.
    pub fn record_status(&self, provider_key: &str, status_code: u16) -> bool {
        let mut counters = self.lock_counters();
        let counter = counters.entry(provider_key.to_string()).or_default();

        if status_code >= 400 {
            counter.consecutive_failures = counter.consecutive_failures.saturating_add(1);
            debug!(
                "Provider '{}' failure {}/{}",
                provider_key, counter.consecutive_failures, self.threshold
            );
            counter.consecutive_failures == self.threshold
        } else {
            counter.consecutive_failures = 0;
            counter.last_success_at = Some(Utc::now());
            false
        }
    }

    async fn raise_alert(&self, ctx: &CallContext) {
        let descriptor = AlertDescriptor {
            name: CONSECUTIVE_FAILURES_ALERT.to_string(),
            severity: AlertSeverity::Critical,
            capability: ctx.capability,
            provider_key: ctx.provider_key.clone(),
            threshold: self.threshold,
            message: format!(
                "Provider '{}' ({}) failed {} consecutive calls",
                ctx.provider_key, ctx.capability, self.threshold
            ),
        };

        error!("{}", descriptor.message);

        let event_id = match self
            .alerts
            .create_alert_event(&descriptor, f64::from(self.threshold))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!("Failed to create alert event for '{}': {}", ctx.provider_key, e);
                None
            }
        };

        let notification = AlertNotification {
            event_id,
            title: format!("Provider {} is failing", ctx.provider_key),
            body: descriptor.message.clone(),
            severity: descriptor.severity,
        };

        if let Err(e) = self.alerts.send_notification(&notification).await {
            warn!("Failed to send alert notification for '{}': {}", ctx.provider_key, e);
        }
    }

    /// Current failure count for a provider key (0 if never seen).
    pub fn consecutive_failures(&self, provider_key: &str) -> u32 {
        self.lock_counters()
            .get(provider_key)
            .map(|c| c.consecutive_failures)
            .unwrap_or(0)
    }

    /// Copy of every counter, keyed by provider key.
    pub fn failure_snapshot(&self) -> HashMap<String, FailureCounter> {
        self.lock_counters().clone()
    }

    /// Clears the counter for one provider key.
    pub fn reset(&self, provider_key: &str) {
        self.lock_counters().remove(provider_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{InMemoryCallLog, MemoryAlertSink};
    use rust_decimal_macros::dec;

    fn meter() -> (CallMeter, Arc<InMemoryCallLog>, Arc<MemoryAlertSink>) {
        let log = Arc::new(InMemoryCallLog::new());
        let alerts = Arc::new(MemoryAlertSink::new());
        (CallMeter::new(log.clone(), alerts.clone()), log, alerts)
    }

    fn ctx() -> CallContext {
        CallContext::new(Capability::Emissions, "ademe", dec!(0.02))
    }

    fn failure() -> ProviderError {
        ProviderError::Unavailable {
            provider: "ademe".to_string(),
            message: "HTTP 503".to_string(),
        }
    }

    async fn fail(meter: &CallMeter) {
        let result: Result<(), _> = meter.observe(&ctx(), "emissions", async { Err(failure()) }).await;
        assert!(result.is_err());
    }

    async fn succeed(meter: &CallMeter) {
        let result = meter.observe(&ctx(), "emissions", async { Ok(1) }).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_records_every_call() {
        let (meter, log, _) = meter();

        succeed(&meter).await;
        fail(&meter).await;

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status_code, 200);
        assert_eq!(records[0].error, None);
        assert_eq!(records[1].status_code, 500);
        assert_eq!(records[1].error.as_deref(), Some("Provider error: ademe - HTTP 503"));
        assert_eq!(records[1].endpoint, "emissions");
        assert_eq!(log.total_cost("ademe"), dec!(0.04));
    }

    #[tokio::test]
    async fn test_alert_fires_once_at_threshold() {
        let (meter, _, alerts) = meter();

        for _ in 0..5 {
            fail(&meter).await;
        }

        let events = alerts.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0.severity, AlertSeverity::Critical);
        assert_eq!(events[0].0.provider_key, "ademe");
        assert_eq!(events[0].1, 3.0);

        let notifications = alerts.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].event_id.as_deref(), Some("alert-1"));
        assert_eq!(meter.consecutive_failures("ademe"), 5);
    }

    #[tokio::test]
    async fn test_success_rearms_alert() {
        let (meter, _, alerts) = meter();

        for _ in 0..3 {
            fail(&meter).await;
        }
        succeed(&meter).await;
        assert_eq!(meter.consecutive_failures("ademe"), 0);

        for _ in 0..3 {
            fail(&meter).await;
        }
        assert_eq!(alerts.events().len(), 2);
    }

    #[tokio::test]
    async fn test_counters_are_per_provider_key() {
        let (meter, _, alerts) = meter();
        let other = CallContext::new(Capability::Emissions, "mock", Decimal::ZERO);

        fail(&meter).await;
        fail(&meter).await;
        let _: Result<(), _> = meter.observe(&other, "emissions", async { Err(failure()) }).await;

        assert!(alerts.events().is_empty());
        let snapshot = meter.failure_snapshot();
        assert_eq!(snapshot["ademe"].consecutive_failures, 2);
        assert_eq!(snapshot["mock"].consecutive_failures, 1);

        meter.reset("ademe");
        assert_eq!(meter.consecutive_failures("ademe"), 0);
        assert_eq!(meter.consecutive_failures("mock"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_failures_fire_exactly_one_alert() {
        let (meter, _, alerts) = meter();
        let meter = Arc::new(meter);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let meter = meter.clone();
                tokio::spawn(async move { fail(&meter).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(alerts.events().len(), 1);
        assert_eq!(meter.consecutive_failures("ademe"), 16);
    }

    #[tokio::test]
    async fn test_success_stamps_last_success() {
        let (meter, _, _) = meter();
        succeed(&meter).await;
        assert!(meter.failure_snapshot()["ademe"].last_success_at.is_some());
    }
}

//! Operational alert sink.

use std::sync::Mutex;

use async_trait::async_trait;
use log::error;
use serde::{Deserialize, Serialize};

use autofill_vehicle_data::Capability;

use crate::errors::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// Describes the condition an alert event is raised for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDescriptor {
    pub name: String,
    pub severity: AlertSeverity,
    pub capability: Capability,
    pub provider_key: String,
    pub threshold: u32,
    pub message: String,
}

/// Notification dispatched after an alert event was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotification {
    pub event_id: Option<String>,
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
}

/// Alerting backend.
///
/// Both calls are best-effort from the caller's point of view: failures are
/// logged and never affect the provider call that triggered them.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Records an alert event; returns its id when the backend assigns one.
    async fn create_alert_event(
        &self,
        descriptor: &AlertDescriptor,
        current_value: f64,
    ) -> Result<Option<String>, StoreError>;

    async fn send_notification(&self, notification: &AlertNotification) -> Result<(), StoreError>;
}

/// Sink that only writes alerts to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn create_alert_event(
        &self,
        descriptor: &AlertDescriptor,
        current_value: f64,
    ) -> Result<Option<String>, StoreError> {
        error!(
            "ALERT [{:?}] {}: {} (value {})",
            descriptor.severity, descriptor.name, descriptor.message, current_value
        );
        Ok(None)
    }

    async fn send_notification(&self, notification: &AlertNotification) -> Result<(), StoreError> {
        error!("NOTIFY {}: {}", notification.title, notification.body);
        Ok(())
    }
}

/// Mock sink for testing - collects alert events and notifications.
#[derive(Default)]
pub struct MemoryAlertSink {
    events: Mutex<Vec<(AlertDescriptor, f64)>>,
    notifications: Mutex<Vec<AlertNotification>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(AlertDescriptor, f64)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn notifications(&self) -> Vec<AlertNotification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AlertSink for MemoryAlertSink {
    async fn create_alert_event(
        &self,
        descriptor: &AlertDescriptor,
        current_value: f64,
    ) -> Result<Option<String>, StoreError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| StoreError::Unavailable("alert lock poisoned".to_string()))?;
        events.push((descriptor.clone(), current_value));
        Ok(Some(format!("alert-{}", events.len())))
    }

    async fn send_notification(&self, notification: &AlertNotification) -> Result<(), StoreError> {
        self.notifications
            .lock()
            .map_err(|_| StoreError::Unavailable("alert lock poisoned".to_string()))?
            .push(notification.clone());
        Ok(())
    }
}

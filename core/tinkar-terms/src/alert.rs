//! Alert reporting for failures that are recovered locally.

use std::sync::{Mutex, PoisonError};

use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Warning,
    Error,
}

/// A problem worth surfacing to an operator without failing the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Error,
            message: message.into(),
        }
    }
}

/// Destination for alerts.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

/// Forwards alerts to `tracing` under the `tinkar::alert` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn alert(&self, alert: Alert) {
        match alert.severity {
            AlertSeverity::Warning => warn!(target: "tinkar::alert", "{}", alert.message),
            AlertSeverity::Error => error!(target: "tinkar::alert", "{}", alert.message),
        }
    }
}

/// Keeps alerts in memory.
#[derive(Debug, Default)]
pub struct CollectingAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl CollectingAlertSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far, oldest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for CollectingAlertSink {
    fn alert(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }
}

use tracing::{debug, error, info, warn};

use crate::types::{StatusEvent, StatusPhase};

/// Trait for receiving status events while a dispatch is in flight
pub trait StatusObserver: Send + Sync {
    /// Called once per event, in emission order, before the outcome is
    /// returned
    fn on_status(&self, event: &StatusEvent);
}

/// Observer that forwards status events to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn on_status(&self, event: &StatusEvent) {
        match event.phase {
            StatusPhase::Sending => debug!(message = %event.message, "Dispatch progress"),
            StatusPhase::Warning => warn!(message = %event.message, "Dispatch warning"),
            StatusPhase::Success => {
                info!(message = %event.message, http_status = ?event.http_status, "Dispatch succeeded");
            }
            StatusPhase::Error => {
                error!(message = %event.message, http_status = ?event.http_status, "Dispatch failed");
            }
        }
    }
}

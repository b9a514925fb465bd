use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::domain::biometric::{device_name, BiometricRecord};
use crate::domain::errors::{DomainError, DomainResult};

/// Upper bound on records produced by one bulk request
pub const MAX_BULK_RECORDS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationStatus {
    pub active: bool,
    pub record_count: usize,
}

/// Stand-in for a fleet of biometric devices syncing readings
///
/// Readings live in memory. A running simulation is a single background
/// task; starting again replaces it and stopping aborts it.
#[derive(Clone, Default)]
pub struct BiometricSimulator {
    records: Arc<RwLock<Vec<BiometricRecord>>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl BiometricSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, record: BiometricRecord) -> BiometricRecord {
        self.records.write().await.push(record.clone());
        record
    }

    pub async fn records(&self) -> Vec<BiometricRecord> {
        self.records.read().await.clone()
    }

    /// One random reading from the first device
    pub async fn generate_dummy(&self) -> BiometricRecord {
        let record = BiometricRecord::dummy(&mut rand::thread_rng(), &device_name(0));
        self.add(record).await
    }

    /// `records_per_device` random readings for each of `device_count` devices
    pub async fn generate_bulk(
        &self,
        device_count: usize,
        records_per_device: usize,
    ) -> DomainResult<Vec<BiometricRecord>> {
        if device_count == 0 || records_per_device == 0 {
            return Err(DomainError::validation(
                "Device count and records per device must be at least 1",
            ));
        }
        let total = device_count.saturating_mul(records_per_device);
        if total > MAX_BULK_RECORDS {
            return Err(DomainError::validation(format!(
                "A bulk request may generate at most {} records",
                MAX_BULK_RECORDS
            )));
        }

        let batch = generate_batch(device_count, records_per_device);
        self.records.write().await.extend(batch.iter().cloned());
        tracing::debug!(device_count, total, "Generated bulk biometric records");
        Ok(batch)
    }

    /// Starts producing one reading per device every `interval`
    ///
    /// A simulation that is already running is replaced.
    pub async fn start(&self, device_count: usize, interval: Duration) -> DomainResult<()> {
        if device_count == 0 {
            return Err(DomainError::validation("Device count must be at least 1"));
        }
        if interval.is_zero() {
            return Err(DomainError::validation("Interval must be at least 1 second"));
        }

        let mut task = self.task.lock().await;
        if let Some(previous) = task.take() {
            previous.abort();
            tracing::info!("Restarting biometric simulation");
        }

        let records = Arc::clone(&self.records);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let batch = generate_batch(device_count, 1);
                records.write().await.extend(batch);
            }
        }));

        tracing::info!(device_count, interval_secs = interval.as_secs(), "Biometric simulation started");
        Ok(())
    }

    /// Stops the running simulation, returning whether one was active
    pub async fn stop(&self) -> bool {
        match self.task.lock().await.take() {
            Some(handle) => {
                handle.abort();
                tracing::info!("Biometric simulation stopped");
                true
            }
            None => false,
        }
    }

    pub async fn status(&self) -> SimulationStatus {
        let active = self
            .task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        SimulationStatus {
            active,
            record_count: self.records.read().await.len(),
        }
    }
}

fn generate_batch(device_count: usize, records_per_device: usize) -> Vec<BiometricRecord> {
    let mut rng = rand::thread_rng();
    (0..device_count)
        .flat_map(|device| std::iter::repeat(device_name(device)).take(records_per_device))
        .map(|device| BiometricRecord::dummy(&mut rng, &device))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bulk_generates_per_device() {
        let simulator = BiometricSimulator::new();
        let batch = simulator.generate_bulk(3, 4).await.unwrap();

        assert_eq!(batch.len(), 12);
        assert_eq!(batch.iter().filter(|r| r.device_id == "device-2").count(), 4);
        assert_eq!(simulator.status().await.record_count, 12);
    }

    #[tokio::test]
    async fn bulk_rejects_empty_and_oversized_requests() {
        let simulator = BiometricSimulator::new();
        assert!(simulator.generate_bulk(0, 5).await.is_err());
        assert!(simulator.generate_bulk(MAX_BULK_RECORDS, 2).await.is_err());
    }

    #[tokio::test]
    async fn start_and_stop() {
        let simulator = BiometricSimulator::new();
        assert!(simulator.start(2, Duration::ZERO).await.is_err());

        simulator.start(2, Duration::from_secs(60)).await.unwrap();
        assert!(simulator.status().await.active);

        // Restarting replaces the task rather than adding a second one
        simulator.start(2, Duration::from_secs(60)).await.unwrap();
        assert!(simulator.stop().await);
        assert!(!simulator.status().await.active);
        assert!(!simulator.stop().await);
    }
}

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::{
    errors::StoreError,
    models::{Alert, NewAlert},
};

/// Durable CRUD for alerts.
///
/// Implementations trust their input: a [`NewAlert`] has already been
/// validated. Ids are assigned here, never by the caller, and are never
/// reused after a delete.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// All alerts in insertion order.
    async fn list(&self) -> Result<Vec<Alert>, StoreError>;

    async fn create(&self, input: NewAlert) -> Result<Alert, StoreError>;

    /// Returns true when a row was removed. Unknown ids are not an error.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// In-process store, used by tests and anywhere a throwaway table will do.
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    table: Mutex<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<Alert>,
    last_id: i64,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn list(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self.table.lock().await.rows.clone())
    }

    async fn create(&self, input: NewAlert) -> Result<Alert, StoreError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;

        let alert = input.into_alert(table.last_id, Utc::now().trunc_subsecs(6));
        table.rows.push(alert.clone());
        Ok(alert)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut table = self.table.lock().await;
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);
        Ok(table.rows.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use futures_util::TryStreamExt;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::{
    errors::StoreError,
    models::{Alert, Condition, NewAlert},
    services::alert_store::AlertStore,
};

const SELECT_ALERTS: &str = "SELECT id, commodity_id, mandi_id, target_price, condition, created_at \
     FROM alerts ORDER BY id";

/// Alert store backed by the `alerts` table.
#[derive(Debug, Clone)]
pub struct SqlAlertStore {
    pool: SqlitePool,
}

impl SqlAlertStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn alert_from_row(row: &SqliteRow) -> Result<Alert, StoreError> {
    let id: i64 = row.try_get("id")?;
    let raw: String = row.try_get("condition")?;
    let condition = raw.parse::<Condition>().map_err(|_| StoreError::Corrupt {
        id,
        reason: format!("unknown condition {raw:?}"),
    })?;

    Ok(Alert {
        id,
        commodity_id: row.try_get("commodity_id")?,
        mandi_id: row.try_get("mandi_id")?,
        target_price: row.try_get("target_price")?,
        condition,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AlertStore for SqlAlertStore {
    async fn list(&self) -> Result<Vec<Alert>, StoreError> {
        let mut rows = sqlx::query(SELECT_ALERTS).fetch(&self.pool);

        let mut items: Vec<Alert> = Vec::new();
        while let Some(row) = rows.try_next().await? {
            items.push(alert_from_row(&row)?);
        }

        tracing::debug!(count = items.len(), "listed alerts");
        Ok(items)
    }

    async fn create(&self, input: NewAlert) -> Result<Alert, StoreError> {
        // microseconds survive the TEXT round trip unchanged
        let created_at = Utc::now().trunc_subsecs(6);

        let res = sqlx::query(
            "INSERT INTO alerts (commodity_id, mandi_id, target_price, condition, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.commodity_id())
        .bind(input.mandi_id())
        .bind(input.target_price())
        .bind(input.condition().as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = res.last_insert_rowid();
        tracing::debug!(id, "inserted alert row");

        Ok(input.into_alert(id, created_at))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM alerts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, removed = res.rows_affected(), "deleted alert row");
        Ok(res.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

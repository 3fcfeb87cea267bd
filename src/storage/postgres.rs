// src/storage/postgres.rs

//! Postgres sink implementation.
//!
//! Rows land via `INSERT .. ON CONFLICT (key) DO UPDATE`, overwriting
//! every non-key column of a matched row. Each batch runs inside one
//! transaction, so there is no row-level partial success.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::Result;
use crate::models::{Contact, Task};
use crate::storage::SyncStore;

/// Columns of the `contacts` table, key first.
const CONTACT_COLUMNS: &[&str] = &[
    "ghl_contact_id",
    "location_id",
    "contact_name",
    "first_name",
    "last_name",
    "email",
    "phone",
    "city",
    "state",
    "country",
    "source",
    "assigned_to",
    "contact_type",
    "dnd",
    "ghl_date_added",
    "ghl_date_updated",
];

/// Columns of the `tasks` table, key first.
const TASK_COLUMNS: &[&str] = &[
    "ghl_task_id",
    "ghl_contact_id",
    "title",
    "body",
    "assigned_to",
    "due_date",
    "completed",
];

/// Build an insert-or-overwrite statement for one row of a table.
///
/// The generated statement conflicts on `key` and overwrites every
/// other column from the incoming row.
fn upsert_sql(table: &str, columns: &[&str], key: &str) -> String {
    let column_list = columns.join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = columns
        .iter()
        .filter(|c| **c != key)
        .map(|c| format!("{c} = EXCLUDED.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {table} ({column_list}) VALUES ({placeholders}) \
         ON CONFLICT ({key}) DO UPDATE SET {assignments}"
    )
}

/// Postgres-backed sink.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database at the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SyncStore for PgStore {
    async fn contact_ids(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT ghl_contact_id FROM contacts")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("ghl_contact_id"))
            .collect())
    }

    async fn upsert_contacts(&self, rows: &[Contact]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let sql = upsert_sql("contacts", CONTACT_COLUMNS, "ghl_contact_id");
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(&sql)
                .bind(&row.ghl_contact_id)
                .bind(&row.location_id)
                .bind(&row.contact_name)
                .bind(&row.first_name)
                .bind(&row.last_name)
                .bind(&row.email)
                .bind(&row.phone)
                .bind(&row.city)
                .bind(&row.state)
                .bind(&row.country)
                .bind(&row.source)
                .bind(&row.assigned_to)
                .bind(&row.contact_type)
                .bind(row.dnd)
                .bind(&row.ghl_date_added)
                .bind(&row.ghl_date_updated)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(rows.len() as u64)
    }

    async fn upsert_tasks(&self, rows: &[Task]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let sql = upsert_sql("tasks", TASK_COLUMNS, "ghl_task_id");
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(&sql)
                .bind(&row.ghl_task_id)
                .bind(&row.ghl_contact_id)
                .bind(&row.title)
                .bind(&row.body)
                .bind(&row.assigned_to)
                .bind(&row.due_date)
                .bind(row.completed)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(rows.len() as u64)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use slotkeeper_core::{
    errors::{AppointmentError, AppointmentResult},
    models::{appointment::Appointment, time_range::TimeRange},
    repository::AppointmentRepository,
};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::{
    DbPool,
    models::DbAppointment,
    schema::{ensure_identifier, lock_table},
};

/// SQLite-backed appointment storage.
///
/// `create` runs in one transaction that first writes the trainer's lock row,
/// so the transaction holds the write lock before it counts conflicts. A
/// concurrent create waits on the busy timeout and then sees the committed
/// booking. Dropping the returned future rolls the transaction back.
#[derive(Debug, Clone)]
pub struct SqlAppointmentRepository {
    pool: DbPool,
    table: String,
}

impl SqlAppointmentRepository {
    pub fn new(pool: DbPool, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        ensure_identifier(&table)?;

        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    async fn lock_trainer(&self, conn: &mut SqliteConnection, trainer_id: &str) -> Result<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {locks} (trainer_id, locked_at)
            VALUES (?, ?)
            ON CONFLICT (trainer_id) DO UPDATE SET locked_at = excluded.locked_at
            "#,
            locks = lock_table(&self.table)
        ))
        .bind(trainer_id)
        .bind(Utc::now().timestamp())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn count_contained(
        &self,
        conn: &mut SqliteConnection,
        trainer_id: &str,
        range: &TimeRange,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM {}
            WHERE trainer_id = ?
              AND starts_at >= ?
              AND ends_at <= ?
            "#,
            self.table
        ))
        .bind(trainer_id)
        .bind(range.start.timestamp())
        .bind(range.end.timestamp())
        .fetch_one(&mut *conn)
        .await?;

        Ok(count)
    }

    async fn insert(&self, conn: &mut SqliteConnection, row: &DbAppointment) -> sqlx::Result<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (id, trainer_id, user_id, starts_at, ends_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
            self.table
        ))
        .bind(&row.id)
        .bind(&row.trainer_id)
        .bind(&row.user_id)
        .bind(row.starts_at)
        .bind(row.ends_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for SqlAppointmentRepository {
    async fn create(&self, appointment: &Appointment) -> AppointmentResult<()> {
        let row = DbAppointment::from(appointment);
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        self.lock_trainer(&mut tx, &row.trainer_id).await?;

        let conflicts = self
            .count_contained(&mut tx, &row.trainer_id, &TimeRange::of(appointment))
            .await?;
        if conflicts > 0 {
            debug!(
                trainer_id = %row.trainer_id,
                starts_at = row.starts_at,
                conflicts,
                "Schedule conflict"
            );
            return Err(AppointmentError::ScheduleConflict);
        }

        if let Err(err) = self.insert(&mut tx, &row).await {
            if is_unique_violation(&err) {
                debug!(id = %row.id, "Appointment id already taken");
                return Err(AppointmentError::IdTaken);
            }

            return Err(database_error(err));
        }

        tx.commit().await.map_err(database_error)?;
        debug!(id = %row.id, trainer_id = %row.trainer_id, "Appointment created");

        Ok(())
    }

    async fn get_by_trainer(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            SELECT id, trainer_id, user_id, starts_at, ends_at
            FROM {}
            WHERE trainer_id = ?
            ORDER BY starts_at ASC
            "#,
            self.table
        ))
        .bind(trainer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        to_appointments(rows)
    }

    async fn get_by_trainer_in_range(
        &self,
        trainer_id: &str,
        range: &TimeRange,
    ) -> AppointmentResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, DbAppointment>(&format!(
            r#"
            SELECT id, trainer_id, user_id, starts_at, ends_at
            FROM {}
            WHERE trainer_id = ?
              AND starts_at >= ?
              AND ends_at <= ?
            ORDER BY starts_at ASC
            "#,
            self.table
        ))
        .bind(trainer_id)
        .bind(range.start.timestamp())
        .bind(range.end.timestamp())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        to_appointments(rows)
    }
}

fn to_appointments(rows: Vec<DbAppointment>) -> AppointmentResult<Vec<Appointment>> {
    let appointments = rows
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(appointments)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn database_error(err: sqlx::Error) -> AppointmentError {
    AppointmentError::Database(err.into())
}

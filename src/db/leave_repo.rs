// src/db/leave_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::leave::{LeaveApplication, LeaveQuery, LeaveStatus, NewLeave},
};

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, leave: &NewLeave, days_requested: i32) -> Result<LeaveApplication, AppError> {
        let created = sqlx::query_as::<_, LeaveApplication>(
            r#"
            INSERT INTO leave_applications (
                employee_id, leave_type, start_date, end_date, days_requested, reason, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(leave.employee_id)
        .bind(leave.leave_type)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(days_requested)
        .bind(&leave.reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list(&self, query: &LeaveQuery) -> Result<Vec<LeaveApplication>, AppError> {
        let leaves = sqlx::query_as::<_, LeaveApplication>(
            r#"
            SELECT * FROM leave_applications
            WHERE ($1::int IS NULL OR employee_id = $1)
              AND ($2::leave_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.employee_id)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    pub async fn find<'e, E>(&self, executor: E, id: i32) -> Result<Option<LeaveApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leave = sqlx::query_as::<_, LeaveApplication>("SELECT * FROM leave_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(leave)
    }

    /// Trava a linha para que duas decisões concorrentes não se sobreponham.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: i32) -> Result<Option<LeaveApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leave = sqlx::query_as::<_, LeaveApplication>(
            "SELECT * FROM leave_applications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(leave)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i32,
        status: LeaveStatus,
        approver: Uuid,
        comments: Option<&str>,
    ) -> Result<LeaveApplication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, LeaveApplication>(
            r#"
            UPDATE leave_applications SET
                status = $2,
                approved_by = $3,
                approved_date = NOW(),
                comments = COALESCE($4, comments)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(approver)
        .bind(comments)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM leave_applications WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_for_employee<'e, E>(&self, executor: E, employee_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM leave_applications WHERE employee_id = $1")
            .bind(employee_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // Licenças aprovadas que tocam o período (folha de pagamento)
    pub async fn approved_overlapping<'e, E>(
        &self,
        executor: E,
        employee_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaveApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leaves = sqlx::query_as::<_, LeaveApplication>(
            r#"
            SELECT * FROM leave_applications
            WHERE employee_id = $1
              AND status = 'approved'
              AND start_date <= $3
              AND end_date >= $2
            "#,
        )
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(leaves)
    }
}

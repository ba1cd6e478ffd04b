// src/db/attendance_repo.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::attendance::{Attendance, AttendanceEntry, AttendanceInput, AttendanceQuery, BarcodeHolder},
};

pub const BARCODE_NOTE: &str = "marked via barcode scan";

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_employee_and_date<'e, E>(
        &self,
        executor: E,
        employee_id: i32,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance WHERE employee_id = $1 AND date = $2",
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(executor)
        .await?;
        Ok(record)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        input: &AttendanceInput,
        hours_worked: Option<Decimal>,
    ) -> Result<Attendance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance (employee_id, date, check_in, check_out, status, hours_worked, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(input.status)
        .bind(hours_worked)
        .bind(input.notes.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    // Atualiza no lugar: status e notas sempre; horários só quando enviados
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        input: &AttendanceInput,
        hours_worked: Option<Decimal>,
    ) -> Result<Attendance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, Attendance>(
            r#"
            UPDATE attendance SET
                status = $2,
                notes = $3,
                check_in = COALESCE($4, check_in),
                check_out = COALESCE($5, check_out),
                hours_worked = COALESCE($6, hours_worked)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.status)
        .bind(input.notes.as_deref())
        .bind(input.check_in)
        .bind(input.check_out)
        .bind(hours_worked)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    /// Funcionário ativo dono do código de barras. Contas admin não batem ponto.
    pub async fn find_active_by_barcode<'e, E>(
        &self,
        executor: E,
        barcode: &str,
    ) -> Result<Option<BarcodeHolder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let holder = sqlx::query_as::<_, BarcodeHolder>(
            r#"
            SELECT a.id AS assignment_id, d.name
            FROM employee_details d
            JOIN employee_assignments a ON a.employee_id = d.id
            WHERE d.barcode = $1
              AND a.status = 'active'
              AND NOT EXISTS (
                  SELECT 1 FROM users u WHERE u.email = d.email AND u.role = 'admin'
              )
            "#,
        )
        .bind(barcode)
        .fetch_optional(executor)
        .await?;
        Ok(holder)
    }

    /// Insere a marcação só se o dia ainda estiver livre.
    /// `None` quando outra marcação venceu a corrida pela UNIQUE (employee_id, date).
    pub async fn insert_barcode_mark<'e, E>(
        &self,
        executor: E,
        employee_id: i32,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> Result<Option<Attendance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendance (employee_id, date, check_in, status, notes)
            VALUES ($1, $2, $3, 'present', $4)
            ON CONFLICT (employee_id, date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(check_in)
        .bind(BARCODE_NOTE)
        .fetch_optional(executor)
        .await?;
        Ok(record)
    }

    pub async fn list(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceEntry>, AppError> {
        let entries = sqlx::query_as::<_, AttendanceEntry>(
            r#"
            SELECT t.id, t.employee_id, d.name AS employee_name, t.date,
                   t.check_in, t.check_out, t.status, t.hours_worked, t.notes
            FROM attendance t
            JOIN employee_assignments a ON a.id = t.employee_id
            JOIN employee_details d ON d.id = a.employee_id
            WHERE ($1::date IS NULL OR t.date = $1)
              AND ($2::int IS NULL OR t.employee_id = $2)
              AND ($3::date IS NULL OR t.date >= $3)
              AND ($4::date IS NULL OR t.date <= $4)
            ORDER BY t.date DESC, d.name ASC
            "#,
        )
        .bind(query.date)
        .bind(query.employee_id)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn for_employee_between<'e, E>(
        &self,
        executor: E,
        employee_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let records = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT * FROM attendance
            WHERE employee_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(employee_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(records)
    }

    pub async fn find(&self, id: i32) -> Result<Option<Attendance>, AppError> {
        let record = sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    pub async fn set_check_out(
        &self,
        id: i32,
        check_out: NaiveTime,
        hours_worked: Option<Decimal>,
    ) -> Result<Option<Attendance>, AppError> {
        let record = sqlx::query_as::<_, Attendance>(
            "UPDATE attendance SET check_out = $2, hours_worked = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(check_out)
        .bind(hours_worked)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_for_employee<'e, E>(&self, executor: E, employee_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM attendance WHERE employee_id = $1")
            .bind(employee_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

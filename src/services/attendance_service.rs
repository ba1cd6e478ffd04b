// src/services/attendance_service.rs

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::{AttendanceRepository, EmployeeRepository},
    models::attendance::{
        hours_between, Attendance, AttendanceEntry, AttendanceInput, AttendanceQuery,
        AttendanceUpsert, BarcodeOutcome, UpsertAction,
    },
};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(attendance_repo: AttendanceRepository, employee_repo: EmployeeRepository, pool: PgPool) -> Self {
        Self { attendance_repo, employee_repo, pool }
    }

    /// Insere ou atualiza o registro do par (funcionário, data).
    /// Uma corrida entre dois inserts é resolvida pela UNIQUE do banco (Duplicate, sem retry).
    pub async fn upsert(&self, input: AttendanceInput) -> Result<AttendanceUpsert, AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        self.employee_repo
            .find_assignment(&mut *tx, input.employee_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "employee", id: input.employee_id })?;

        let existing = self
            .attendance_repo
            .find_by_employee_and_date(&mut *tx, input.employee_id, input.date)
            .await?;

        let upsert = match existing {
            Some(current) => {
                let check_in = input.check_in.or(current.check_in);
                let check_out = input.check_out.or(current.check_out);
                let hours = worked_hours(check_in, check_out);
                let record = self
                    .attendance_repo
                    .update(&mut *tx, current.id, &input, hours)
                    .await?;
                AttendanceUpsert { action: UpsertAction::Updated, record }
            }
            None => {
                let hours = worked_hours(input.check_in, input.check_out);
                let record = self.attendance_repo.insert(&mut *tx, &input, hours).await?;
                AttendanceUpsert { action: UpsertAction::Added, record }
            }
        };

        tx.commit().await?;
        Ok(upsert)
    }

    /// Marca presença pelo código de barras. Nunca altera um registro existente.
    pub async fn barcode_check_in(&self, barcode: &str, date: Option<NaiveDate>) -> Result<BarcodeOutcome, AppError> {
        let now = Local::now();
        let date = date.unwrap_or_else(|| now.date_naive());
        let check_in = now.time().with_nanosecond(0).unwrap_or_else(|| now.time());

        let mut tx = begin_transaction(&self.pool).await?;

        let Some(holder) = self
            .attendance_repo
            .find_active_by_barcode(&mut *tx, barcode.trim())
            .await?
        else {
            return Ok(BarcodeOutcome::NotFound);
        };

        if let Some(existing) = self
            .attendance_repo
            .find_by_employee_and_date(&mut *tx, holder.assignment_id, date)
            .await?
        {
            return Ok(BarcodeOutcome::AlreadyMarked {
                employee_name: holder.name,
                date,
                status: existing.status,
            });
        }

        let inserted = self
            .attendance_repo
            .insert_barcode_mark(&mut *tx, holder.assignment_id, date, check_in)
            .await?;

        if inserted.is_none() {
            // Leitura num novo statement já enxerga a marcação concorrente confirmada
            let existing = self
                .attendance_repo
                .find_by_employee_and_date(&mut *tx, holder.assignment_id, date)
                .await?
                .ok_or(AppError::NotFound("attendance"))?;
            tx.commit().await?;

            tracing::debug!("📷 Marcação concorrente já registrada para {} em {}", holder.name, date);
            return Ok(BarcodeOutcome::AlreadyMarked {
                employee_name: holder.name,
                date,
                status: existing.status,
            });
        }
        tx.commit().await?;

        tracing::info!("📷 Presença via código de barras: {} em {}", holder.name, date);
        Ok(BarcodeOutcome::Marked { employee_name: holder.name })
    }

    pub async fn list(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceEntry>, AppError> {
        self.attendance_repo.list(query).await
    }

    /// Registra a saída; sem horário informado usa a hora atual.
    pub async fn check_out(&self, id: i32, at: Option<NaiveTime>) -> Result<Attendance, AppError> {
        let current = self
            .attendance_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("attendance"))?;

        let check_out = match at {
            Some(time) => time,
            None => {
                let now = Local::now().time();
                now.with_nanosecond(0).unwrap_or(now)
            }
        };
        let hours = worked_hours(current.check_in, Some(check_out));

        self.attendance_repo
            .set_check_out(id, check_out, hours)
            .await?
            .ok_or(AppError::NotFound("attendance"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = self.attendance_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("attendance"));
        }
        Ok(())
    }
}

fn worked_hours(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> Option<Decimal> {
    match (check_in, check_out) {
        (Some(start), Some(end)) => Some(hours_between(start, end)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_need_both_ends() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0);
        let five = NaiveTime::from_hms_opt(17, 30, 0);
        assert_eq!(worked_hours(nine, five), Some(Decimal::new(850, 2)));
        assert_eq!(worked_hours(nine, None), None);
        assert_eq!(worked_hours(None, five), None);
    }
}

// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Um único round-trip com subconsultas; o admin fica fora das contagens.
    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            WITH staff AS (
                SELECT d.id, a.id AS assignment_id
                FROM employee_details d
                LEFT JOIN employee_assignments a ON a.employee_id = d.id
                WHERE NOT EXISTS (
                    SELECT 1 FROM users u WHERE u.email = d.email AND u.role = 'admin'
                )
            )
            SELECT
                (SELECT COUNT(*) FROM staff) AS total_employees,
                (SELECT COUNT(*) FROM staff WHERE assignment_id IS NULL) AS unassigned_employees,
                (SELECT COUNT(*) FROM departments) AS departments,
                (SELECT COUNT(*) FROM attendance
                    WHERE date = $1 AND status IN ('present', 'late', 'half_day')) AS present_today,
                (SELECT COUNT(*) FROM leave_applications WHERE status = 'pending') AS pending_leaves
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::policy::{
        LeavePolicy, OvertimePolicy, TaxPolicy, UpdateLeavePolicy, UpdateOvertimePolicy,
        UpdateTaxPolicy, COMPANY_ID,
    },
};

#[derive(Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Se a linha ainda não existe, devolvemos os valores padrão (sem gravar).

    pub async fn get_overtime<'e, E>(&self, executor: E) -> Result<OvertimePolicy, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let policy = sqlx::query_as::<_, OvertimePolicy>(
            "SELECT * FROM overtime_policies WHERE company_id = $1",
        )
        .bind(COMPANY_ID)
        .fetch_optional(executor)
        .await?;
        Ok(policy.unwrap_or_default())
    }

    pub async fn get_leave<'e, E>(&self, executor: E) -> Result<LeavePolicy, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let policy = sqlx::query_as::<_, LeavePolicy>(
            "SELECT * FROM leave_policies WHERE company_id = $1",
        )
        .bind(COMPANY_ID)
        .fetch_optional(executor)
        .await?;
        Ok(policy.unwrap_or_default())
    }

    pub async fn get_tax<'e, E>(&self, executor: E) -> Result<TaxPolicy, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let policy = sqlx::query_as::<_, TaxPolicy>(
            "SELECT * FROM tax_policies WHERE company_id = $1",
        )
        .bind(COMPANY_ID)
        .fetch_optional(executor)
        .await?;
        Ok(policy.unwrap_or_default())
    }

    // UPSERT (Insert or Update)
    pub async fn update_overtime(&self, input: &UpdateOvertimePolicy) -> Result<OvertimePolicy, AppError> {
        let policy = sqlx::query_as::<_, OvertimePolicy>(
            r#"
            INSERT INTO overtime_policies (company_id, allowed, bonus_enabled, bonus_rate)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id)
            DO UPDATE SET
                allowed = EXCLUDED.allowed,
                bonus_enabled = EXCLUDED.bonus_enabled,
                bonus_rate = EXCLUDED.bonus_rate,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(COMPANY_ID)
        .bind(input.allowed)
        .bind(input.bonus_enabled)
        .bind(input.bonus_rate)
        .fetch_one(&self.pool)
        .await?;
        Ok(policy)
    }

    pub async fn update_leave(&self, input: &UpdateLeavePolicy) -> Result<LeavePolicy, AppError> {
        let policy = sqlx::query_as::<_, LeavePolicy>(
            r#"
            INSERT INTO leave_policies (company_id, deduction_enabled, max_per_month, max_per_year, deduction_rate)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (company_id)
            DO UPDATE SET
                deduction_enabled = EXCLUDED.deduction_enabled,
                max_per_month = EXCLUDED.max_per_month,
                max_per_year = EXCLUDED.max_per_year,
                deduction_rate = EXCLUDED.deduction_rate,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(COMPANY_ID)
        .bind(input.deduction_enabled)
        .bind(input.max_per_month)
        .bind(input.max_per_year)
        .bind(input.deduction_rate)
        .fetch_one(&self.pool)
        .await?;
        Ok(policy)
    }

    pub async fn update_tax(&self, input: &UpdateTaxPolicy) -> Result<TaxPolicy, AppError> {
        let policy = sqlx::query_as::<_, TaxPolicy>(
            r#"
            INSERT INTO tax_policies (company_id, enabled, rate, exemption_limit)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (company_id)
            DO UPDATE SET
                enabled = EXCLUDED.enabled,
                rate = EXCLUDED.rate,
                exemption_limit = EXCLUDED.exemption_limit,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(COMPANY_ID)
        .bind(input.enabled)
        .bind(input.rate)
        .bind(input.exemption_limit)
        .fetch_one(&self.pool)
        .await?;
        Ok(policy)
    }
}

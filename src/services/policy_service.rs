// src/services/policy_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::PolicyRepository,
    models::policy::{
        LeavePolicy, OvertimePolicy, TaxPolicy, UpdateLeavePolicy, UpdateOvertimePolicy,
        UpdateTaxPolicy,
    },
};

#[derive(Clone)]
pub struct PolicyService {
    repo: PolicyRepository,
    pool: PgPool,
}

impl PolicyService {
    pub fn new(repo: PolicyRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn get_overtime(&self) -> Result<OvertimePolicy, AppError> {
        self.repo.get_overtime(&self.pool).await
    }

    pub async fn update_overtime(&self, input: &UpdateOvertimePolicy) -> Result<OvertimePolicy, AppError> {
        let policy = self.repo.update_overtime(input).await?;
        tracing::info!("⚙️ Política de horas extras atualizada");
        Ok(policy)
    }

    pub async fn get_leave(&self) -> Result<LeavePolicy, AppError> {
        self.repo.get_leave(&self.pool).await
    }

    pub async fn update_leave(&self, input: &UpdateLeavePolicy) -> Result<LeavePolicy, AppError> {
        if input.max_per_month > input.max_per_year {
            return Err(AppError::InvalidInput(
                "maxPerMonth must not exceed maxPerYear".to_string(),
            ));
        }
        let policy = self.repo.update_leave(input).await?;
        tracing::info!("⚙️ Política de licenças atualizada");
        Ok(policy)
    }

    pub async fn get_tax(&self) -> Result<TaxPolicy, AppError> {
        self.repo.get_tax(&self.pool).await
    }

    pub async fn update_tax(&self, input: &UpdateTaxPolicy) -> Result<TaxPolicy, AppError> {
        let policy = self.repo.update_tax(input).await?;
        tracing::info!("⚙️ Política de imposto atualizada");
        Ok(policy)
    }
}

// src/services/leave_service.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::{EmployeeRepository, LeaveRepository},
    models::leave::{days_requested, LeaveApplication, LeaveQuery, LeaveStatus, NewLeave},
    services::auth::AuthUser,
};

#[derive(Clone)]
pub struct LeaveService {
    leave_repo: LeaveRepository,
    employee_repo: EmployeeRepository,
    pool: PgPool,
}

impl LeaveService {
    pub fn new(leave_repo: LeaveRepository, employee_repo: EmployeeRepository, pool: PgPool) -> Self {
        Self { leave_repo, employee_repo, pool }
    }

    pub async fn apply(&self, leave: NewLeave) -> Result<LeaveApplication, AppError> {
        let days = days_requested(leave.start_date, leave.end_date)?;

        self.employee_repo
            .find_assignment(&self.pool, leave.employee_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "employee", id: leave.employee_id })?;

        let created = self.leave_repo.insert(&leave, days).await?;
        tracing::info!(
            "📝 Licença {} solicitada por {} ({} dias)",
            created.id,
            created.employee_id,
            days
        );
        Ok(created)
    }

    pub async fn list(&self, query: &LeaveQuery) -> Result<Vec<LeaveApplication>, AppError> {
        self.leave_repo.list(query).await
    }

    pub async fn get(&self, id: i32) -> Result<LeaveApplication, AppError> {
        self.leave_repo
            .find(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("leave"))
    }

    /// Decisão sobre a licença. approved/rejected são finais.
    pub async fn update_status(
        &self,
        id: i32,
        raw_status: &str,
        approver: &AuthUser,
        comments: Option<&str>,
    ) -> Result<LeaveApplication, AppError> {
        let status = LeaveStatus::parse_decision(raw_status)?;

        let mut tx = begin_transaction(&self.pool).await?;

        let current = self
            .leave_repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("leave"))?;
        current.status.check_transition(status)?;

        let updated = self
            .leave_repo
            .update_status(&mut *tx, id, status, approver.id, comments)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "✅ Licença {}: {} -> {} por {}",
            id,
            current.status.as_str(),
            status.as_str(),
            approver.email
        );
        Ok(updated)
    }

    /// Só licenças ainda não decididas (pending/viewed) podem ser apagadas.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        let current = self
            .leave_repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("leave"))?;
        if !current.status.is_deletable() {
            return Err(AppError::LeaveNotDeletable(current.status.as_str().to_string()));
        }

        self.leave_repo.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// src/services/organization_service.rs

use sqlx::{PgConnection, PgPool};

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::{EmployeeRepository, OrganizationRepository},
    models::organization::{
        CascadeSummary, Department, DepartmentPayload, Designation, DesignationPayload, Role,
        RolePayload, Section, SectionPayload,
    },
    services::employee_service::EmployeeService,
};

/// CRUD da hierarquia. As exclusões descem a árvore (sem ON DELETE CASCADE no banco)
/// e removem cada funcionário alocado pelo caminho, tudo numa transação só.
#[derive(Clone)]
pub struct OrganizationService {
    org_repo: OrganizationRepository,
    employee_repo: EmployeeRepository,
    employee_service: EmployeeService,
    pool: PgPool,
}

impl OrganizationService {
    pub fn new(
        org_repo: OrganizationRepository,
        employee_repo: EmployeeRepository,
        employee_service: EmployeeService,
        pool: PgPool,
    ) -> Self {
        Self { org_repo, employee_repo, employee_service, pool }
    }

    // =========================================================================
    //  DEPARTMENTS
    // =========================================================================

    pub async fn create_department(&self, payload: &DepartmentPayload) -> Result<Department, AppError> {
        self.org_repo.create_department(payload.name.trim()).await
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        self.org_repo.list_departments().await
    }

    pub async fn get_department(&self, id: i32) -> Result<Department, AppError> {
        self.org_repo
            .find_department(id)
            .await?
            .ok_or(AppError::NotFound("department"))
    }

    pub async fn update_department(&self, id: i32, payload: &DepartmentPayload) -> Result<Department, AppError> {
        self.org_repo
            .rename_department(id, payload.name.trim())
            .await?
            .ok_or(AppError::NotFound("department"))
    }

    pub async fn delete_department(&self, id: i32) -> Result<CascadeSummary, AppError> {
        self.get_department(id).await?;

        let mut tx = begin_transaction(&self.pool).await?;
        let mut summary = CascadeSummary::default();

        let sections = self.org_repo.sections_of_department(&mut *tx, id).await?;
        for section in &sections {
            self.purge_section(&mut *tx, section.id, &mut summary).await?;
        }
        summary.departments += self.org_repo.delete_department(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!("🗑️ Departamento {} removido em cascata: {:?}", id, summary);
        Ok(summary)
    }

    // =========================================================================
    //  SECTIONS
    // =========================================================================

    pub async fn create_section(&self, payload: &SectionPayload) -> Result<Section, AppError> {
        self.ensure_department(payload.department_id).await?;
        self.org_repo
            .create_section(payload.name.trim(), payload.department_id)
            .await
    }

    pub async fn list_sections(&self) -> Result<Vec<Section>, AppError> {
        self.org_repo.list_sections().await
    }

    pub async fn get_section(&self, id: i32) -> Result<Section, AppError> {
        self.org_repo
            .find_section(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("section"))
    }

    pub async fn update_section(&self, id: i32, payload: &SectionPayload) -> Result<Section, AppError> {
        self.ensure_department(payload.department_id).await?;
        self.org_repo
            .update_section(id, payload.name.trim(), payload.department_id)
            .await?
            .ok_or(AppError::NotFound("section"))
    }

    pub async fn delete_section(&self, id: i32) -> Result<CascadeSummary, AppError> {
        self.get_section(id).await?;

        let mut tx = begin_transaction(&self.pool).await?;
        let mut summary = CascadeSummary::default();
        self.purge_section(&mut *tx, id, &mut summary).await?;
        tx.commit().await?;

        tracing::info!("🗑️ Seção {} removida em cascata: {:?}", id, summary);
        Ok(summary)
    }

    // =========================================================================
    //  ROLES
    // =========================================================================

    pub async fn create_role(&self, payload: &RolePayload) -> Result<Role, AppError> {
        self.org_repo.create_role(payload.name.trim()).await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.org_repo.list_roles().await
    }

    pub async fn get_role(&self, id: i32) -> Result<Role, AppError> {
        self.org_repo.find_role(&self.pool, id).await?.ok_or(AppError::NotFound("role"))
    }

    pub async fn update_role(&self, id: i32, payload: &RolePayload) -> Result<Role, AppError> {
        self.org_repo
            .rename_role(id, payload.name.trim())
            .await?
            .ok_or(AppError::NotFound("role"))
    }

    pub async fn delete_role(&self, id: i32) -> Result<CascadeSummary, AppError> {
        self.get_role(id).await?;

        let mut tx = begin_transaction(&self.pool).await?;
        let mut summary = CascadeSummary::default();

        let designations = self.org_repo.designations_of_role(&mut *tx, id).await?;
        for designation in &designations {
            self.purge_designation(&mut *tx, designation.id, &mut summary).await?;
        }
        summary.roles += self.org_repo.delete_role(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!("🗑️ Função {} removida em cascata: {:?}", id, summary);
        Ok(summary)
    }

    // =========================================================================
    //  DESIGNATIONS
    // =========================================================================

    pub async fn create_designation(&self, payload: &DesignationPayload) -> Result<Designation, AppError> {
        self.ensure_role(payload.role_id).await?;
        self.org_repo
            .create_designation(payload.name.trim(), payload.role_id)
            .await
    }

    pub async fn list_designations(&self) -> Result<Vec<Designation>, AppError> {
        self.org_repo.list_designations().await
    }

    pub async fn get_designation(&self, id: i32) -> Result<Designation, AppError> {
        self.org_repo
            .find_designation(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("designation"))
    }

    pub async fn update_designation(&self, id: i32, payload: &DesignationPayload) -> Result<Designation, AppError> {
        self.ensure_role(payload.role_id).await?;
        self.org_repo
            .update_designation(id, payload.name.trim(), payload.role_id)
            .await?
            .ok_or(AppError::NotFound("designation"))
    }

    pub async fn delete_designation(&self, id: i32) -> Result<CascadeSummary, AppError> {
        self.get_designation(id).await?;

        let mut tx = begin_transaction(&self.pool).await?;
        let mut summary = CascadeSummary::default();
        self.purge_designation(&mut *tx, id, &mut summary).await?;
        tx.commit().await?;

        tracing::info!("🗑️ Cargo {} removido em cascata: {:?}", id, summary);
        Ok(summary)
    }

    // =========================================================================
    //  CASCATA
    // =========================================================================

    async fn purge_section(
        &self,
        conn: &mut PgConnection,
        section_id: i32,
        summary: &mut CascadeSummary,
    ) -> Result<(), AppError> {
        let leaves = self.employee_repo.leaves_by_section(&mut *conn, section_id).await?;
        for leaf in &leaves {
            let counts = self.employee_service.purge_leaf(&mut *conn, leaf).await?;
            summary.absorb(counts.attendance, counts.leaves, counts.credentials);
        }
        summary.sections += self.org_repo.delete_section(&mut *conn, section_id).await?;
        Ok(())
    }

    async fn purge_designation(
        &self,
        conn: &mut PgConnection,
        designation_id: i32,
        summary: &mut CascadeSummary,
    ) -> Result<(), AppError> {
        let leaves = self
            .employee_repo
            .leaves_by_designation(&mut *conn, designation_id)
            .await?;
        for leaf in &leaves {
            let counts = self.employee_service.purge_leaf(&mut *conn, leaf).await?;
            summary.absorb(counts.attendance, counts.leaves, counts.credentials);
        }
        summary.designations += self.org_repo.delete_designation(&mut *conn, designation_id).await?;
        Ok(())
    }

    async fn ensure_department(&self, department_id: i32) -> Result<(), AppError> {
        self.org_repo
            .find_department(department_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "department", id: department_id })?;
        Ok(())
    }

    async fn ensure_role(&self, role_id: Option<i32>) -> Result<(), AppError> {
        if let Some(role_id) = role_id {
            self.org_repo
                .find_role(&self.pool, role_id)
                .await?
                .ok_or(AppError::ReferenceNotFound { entity: "role", id: role_id })?;
        }
        Ok(())
    }
}

impl CascadeSummary {
    /// Soma um funcionário removido ao resumo.
    fn absorb(&mut self, attendance: u64, leaves: u64, credentials: u64) {
        self.employees += 1;
        self.attendance_records += attendance;
        self.leave_applications += leaves;
        self.credentials += credentials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorbing_a_leaf_counts_one_employee() {
        let mut summary = CascadeSummary::default();
        summary.absorb(3, 1, 1);
        summary.absorb(0, 0, 0);

        assert_eq!(
            summary,
            CascadeSummary {
                employees: 2,
                attendance_records: 3,
                leave_applications: 1,
                credentials: 1,
                ..Default::default()
            }
        );
    }
}

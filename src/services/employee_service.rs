// src/services/employee_service.rs

use sqlx::{PgConnection, PgPool};

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::{
        AttendanceRepository, EmployeeLeaf, EmployeeRepository, LeaveRepository,
        OrganizationRepository, UserRepository,
    },
    models::{
        auth::UserRole,
        employee::{
            AssignmentChanges, AssignmentFilter, CreatedEmployee, DeletedEmployee, Employee,
            EmployeeAssignment, EmployeeDetails, NewAssignment, NewEmployee, PersonalInfoChanges,
        },
        organization::Designation,
    },
    services::auth::{hash_password, username_from_email},
};

/// O que uma exclusão de funcionário alocado removeu.
#[derive(Debug, Default, Clone, Copy)]
pub struct PurgeCounts {
    pub attendance: u64,
    pub leaves: u64,
    pub credentials: u64,
}

#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
    org_repo: OrganizationRepository,
    user_repo: UserRepository,
    attendance_repo: AttendanceRepository,
    leave_repo: LeaveRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(
        employee_repo: EmployeeRepository,
        org_repo: OrganizationRepository,
        user_repo: UserRepository,
        attendance_repo: AttendanceRepository,
        leave_repo: LeaveRepository,
        pool: PgPool,
    ) -> Self {
        Self { employee_repo, org_repo, user_repo, attendance_repo, leave_repo, pool }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn list(&self, filter: Option<AssignmentFilter>) -> Result<Vec<Employee>, AppError> {
        let rows = self.employee_repo.list(filter).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    pub async fn get_by_detail(&self, detail_id: i32) -> Result<Employee, AppError> {
        self.employee_repo
            .find_row_by_detail(detail_id)
            .await?
            .map(Employee::from)
            .ok_or(AppError::NotFound("employee"))
    }

    pub async fn get_by_assignment(&self, assignment_id: i32) -> Result<Employee, AppError> {
        self.employee_repo
            .find_row_by_assignment(assignment_id)
            .await?
            .map(Employee::from)
            .ok_or(AppError::NotFound("employee"))
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    /// Cria a identidade e, atomicamente, a alocação e a credencial (quando enviadas).
    /// Qualquer falha desfaz as três inserções.
    pub async fn add_employee(&self, input: NewEmployee) -> Result<CreatedEmployee, AppError> {
        // Hashing fora da transação: não toca no banco
        let hashed_password = match input.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let mut tx = begin_transaction(&self.pool).await?;

        // 1. Identidade
        let details = self
            .employee_repo
            .insert_details(&mut *tx, &input.name, &input.national_id, input.start_date, &input.email)
            .await?;

        // 2. Alocação (só com seção E cargo)
        let assignment_id = match &input.assignment {
            Some(assignment) => {
                self.check_references(&mut *tx, assignment.section_id, assignment.designation_id)
                    .await?;
                let created = self
                    .employee_repo
                    .insert_assignment(&mut *tx, details.id, assignment)
                    .await?;
                Some(created.id)
            }
            None => None,
        };

        // 3. Credencial
        if let Some(hashed) = hashed_password {
            self.user_repo
                .create_user(
                    &mut *tx,
                    &username_from_email(&input.email),
                    &input.email,
                    &hashed,
                    UserRole::Employee,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "✅ Funcionário {} criado (detail_id={}, assignment_id={:?})",
            input.name,
            details.id,
            assignment_id
        );

        Ok(CreatedEmployee { detail_id: details.id, assignment_id })
    }

    /// Aloca um funcionário que ainda não tem alocação.
    pub async fn assign(
        &self,
        detail_id: i32,
        role_id: i32,
        assignment: NewAssignment,
    ) -> Result<EmployeeAssignment, AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        self.employee_repo
            .find_details(&mut *tx, detail_id)
            .await?
            .ok_or(AppError::NotFound("employee"))?;

        if self
            .employee_repo
            .find_assignment_by_employee(&mut *tx, detail_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyAssigned);
        }

        let designation = self
            .check_references(&mut *tx, assignment.section_id, assignment.designation_id)
            .await?;

        self.org_repo
            .find_role(&mut *tx, role_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "role", id: role_id })?;

        // O cargo precisa pertencer à função informada
        if let Some(designation_role) = designation.role_id {
            if designation_role != role_id {
                return Err(AppError::DesignationRoleMismatch {
                    designation_id: assignment.designation_id,
                    role_id,
                });
            }
        }

        let created = self
            .employee_repo
            .insert_assignment(&mut *tx, detail_id, &assignment)
            .await?;
        let created = self.employee_repo.force_active(&mut *tx, created.id).await?;

        tx.commit().await?;

        tracing::info!("🔗 Funcionário {} alocado (assignment_id={})", detail_id, created.id);
        Ok(created)
    }

    // =========================================================================
    //  ATUALIZAÇÃO
    // =========================================================================

    /// Atualização parcial da alocação. O status termina sempre 'active',
    /// sobrescrevendo o 'changed' que o trigger aplica.
    pub async fn update_assignment(
        &self,
        assignment_id: i32,
        changes: AssignmentChanges,
    ) -> Result<EmployeeAssignment, AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        let current = self
            .employee_repo
            .find_assignment(&mut *tx, assignment_id)
            .await?
            .ok_or(AppError::NotFound("employee"))?;

        let section_id = changes.section_id.unwrap_or(current.section_id);
        let designation_id = changes.designation_id.unwrap_or(current.designation_id);
        self.check_references(&mut *tx, section_id, designation_id).await?;

        self.employee_repo
            .update_assignment(&mut *tx, assignment_id, &changes)
            .await?;
        let updated = self.employee_repo.force_active(&mut *tx, assignment_id).await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn update_personal_info(
        &self,
        detail_id: i32,
        changes: PersonalInfoChanges,
    ) -> Result<EmployeeDetails, AppError> {
        let mut tx = begin_transaction(&self.pool).await?;

        let current = self
            .employee_repo
            .find_details(&mut *tx, detail_id)
            .await?
            .ok_or(AppError::NotFound("employee"))?;

        let updated = self
            .employee_repo
            .update_personal_info(&mut *tx, detail_id, &changes)
            .await?;

        // A credencial é localizada pelo e-mail: precisa acompanhar a troca
        if updated.email != current.email {
            self.user_repo
                .update_email(&mut *tx, &current.email, &updated.email)
                .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn set_barcode(&self, detail_id: i32, barcode: Option<&str>) -> Result<EmployeeDetails, AppError> {
        self.employee_repo
            .set_barcode(&self.pool, detail_id, barcode)
            .await?
            .ok_or(AppError::NotFound("employee"))
    }

    // =========================================================================
    //  EXCLUSÃO
    // =========================================================================

    pub async fn delete_by_assignment(&self, assignment_id: i32) -> Result<DeletedEmployee, AppError> {
        let assignment = self
            .employee_repo
            .find_assignment(&self.pool, assignment_id)
            .await?
            .ok_or(AppError::NotFound("employee"))?;
        self.delete_by_detail(assignment.employee_id).await
    }

    /// Aceita funcionários nunca alocados. Ordem: credencial -> alocação -> identidade.
    pub async fn delete_by_detail(&self, detail_id: i32) -> Result<DeletedEmployee, AppError> {
        let details = self
            .employee_repo
            .find_details(&self.pool, detail_id)
            .await?
            .ok_or(AppError::NotFound("employee"))?;

        let mut tx = begin_transaction(&self.pool).await?;

        let credentials = self.user_repo.delete_by_email(&mut *tx, &details.email).await?;

        let assignment = self
            .employee_repo
            .find_assignment_by_employee(&mut *tx, detail_id)
            .await?;

        let mut attendance_records = 0;
        let mut leave_applications = 0;
        if let Some(assignment) = &assignment {
            attendance_records = self.attendance_repo.delete_for_employee(&mut *tx, assignment.id).await?;
            leave_applications = self.leave_repo.delete_for_employee(&mut *tx, assignment.id).await?;
            self.employee_repo.delete_assignment(&mut *tx, assignment.id).await?;
        }

        self.employee_repo.delete_details(&mut *tx, detail_id).await?;

        tx.commit().await?;

        tracing::info!("🗑️ Funcionário {} removido", detail_id);
        Ok(DeletedEmployee {
            detail_id,
            assignment_id: assignment.map(|a| a.id),
            attendance_records,
            leave_applications,
            credentials,
        })
    }

    /// Remove um funcionário alocado dentro de uma transação maior (cascata da hierarquia).
    /// Ordem: presença -> licenças -> alocação -> credencial -> identidade.
    pub async fn purge_leaf(&self, conn: &mut PgConnection, leaf: &EmployeeLeaf) -> Result<PurgeCounts, AppError> {
        let attendance = self.attendance_repo.delete_for_employee(&mut *conn, leaf.assignment_id).await?;
        let leaves = self.leave_repo.delete_for_employee(&mut *conn, leaf.assignment_id).await?;
        self.employee_repo.delete_assignment(&mut *conn, leaf.assignment_id).await?;
        let credentials = self.user_repo.delete_by_email(&mut *conn, &leaf.email).await?;
        self.employee_repo.delete_details(&mut *conn, leaf.detail_id).await?;

        Ok(PurgeCounts { attendance, leaves, credentials })
    }

    // Seção e cargo referenciados precisam existir
    async fn check_references(
        &self,
        conn: &mut PgConnection,
        section_id: i32,
        designation_id: i32,
    ) -> Result<Designation, AppError> {
        self.org_repo
            .find_section(&mut *conn, section_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "section", id: section_id })?;

        let designation = self
            .org_repo
            .find_designation(&mut *conn, designation_id)
            .await?
            .ok_or(AppError::ReferenceNotFound { entity: "designation", id: designation_id })?;

        Ok(designation)
    }
}

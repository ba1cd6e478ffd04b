// src/db/employee_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, FromRow, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::employee::{
        AssignmentChanges, AssignmentFilter, EmployeeAssignment, EmployeeDetails, EmployeeRow,
        NewAssignment, PersonalInfoChanges,
    },
};

// SELECT base da listagem. O admin nunca aparece nas listagens de funcionários.
const EMPLOYEE_ROW_SELECT: &str = r#"
    SELECT
        d.id AS detail_id, d.name, d.national_id, d.start_date, d.email, d.barcode,
        a.id AS assignment_id,
        a.section_id, s.name AS section_name,
        s.department_id, dep.name AS department_name,
        a.designation_id, g.name AS designation_name,
        r.id AS role_id, r.name AS role_name,
        a.employment_type, a.status,
        a.work_start_time, a.work_end_time, a.salary, a.bonus
    FROM employee_details d
    LEFT JOIN employee_assignments a ON a.employee_id = d.id
    LEFT JOIN sections s ON s.id = a.section_id
    LEFT JOIN departments dep ON dep.id = s.department_id
    LEFT JOIN designations g ON g.id = a.designation_id
    LEFT JOIN roles r ON r.id = g.role_id
    WHERE NOT EXISTS (
        SELECT 1 FROM users u WHERE u.email = d.email AND u.role = 'admin'
    )
"#;

/// O mínimo necessário para apagar um funcionário alocado (folha da cascata).
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeLeaf {
    pub assignment_id: i32,
    pub detail_id: i32,
    pub email: String,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn list(&self, filter: Option<AssignmentFilter>) -> Result<Vec<EmployeeRow>, AppError> {
        let assigned = filter.map(|f| f == AssignmentFilter::Assigned);
        let sql = format!(
            "{} AND ($1::boolean IS NULL OR (a.id IS NOT NULL) = $1) ORDER BY d.name ASC",
            EMPLOYEE_ROW_SELECT
        );
        let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(assigned)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_row_by_detail(&self, detail_id: i32) -> Result<Option<EmployeeRow>, AppError> {
        let sql = format!("{} AND d.id = $1", EMPLOYEE_ROW_SELECT);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(detail_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_row_by_assignment(&self, assignment_id: i32) -> Result<Option<EmployeeRow>, AppError> {
        let sql = format!("{} AND a.id = $1", EMPLOYEE_ROW_SELECT);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(assignment_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_details<'e, E>(&self, executor: E, detail_id: i32) -> Result<Option<EmployeeDetails>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let details = sqlx::query_as::<_, EmployeeDetails>("SELECT * FROM employee_details WHERE id = $1")
            .bind(detail_id)
            .fetch_optional(executor)
            .await?;
        Ok(details)
    }

    pub async fn find_assignment<'e, E>(&self, executor: E, assignment_id: i32) -> Result<Option<EmployeeAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, EmployeeAssignment>(
            "SELECT * FROM employee_assignments WHERE id = $1",
        )
        .bind(assignment_id)
        .fetch_optional(executor)
        .await?;
        Ok(assignment)
    }

    pub async fn find_assignment_by_employee<'e, E>(
        &self,
        executor: E,
        detail_id: i32,
    ) -> Result<Option<EmployeeAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, EmployeeAssignment>(
            "SELECT * FROM employee_assignments WHERE employee_id = $1",
        )
        .bind(detail_id)
        .fetch_optional(executor)
        .await?;
        Ok(assignment)
    }

    // Folhas da cascata, por seção
    pub async fn leaves_by_section<'e, E>(&self, executor: E, section_id: i32) -> Result<Vec<EmployeeLeaf>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leaves = sqlx::query_as::<_, EmployeeLeaf>(
            r#"
            SELECT a.id AS assignment_id, d.id AS detail_id, d.email
            FROM employee_assignments a
            JOIN employee_details d ON d.id = a.employee_id
            WHERE a.section_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(section_id)
        .fetch_all(executor)
        .await?;
        Ok(leaves)
    }

    // Folhas da cascata, por cargo
    pub async fn leaves_by_designation<'e, E>(&self, executor: E, designation_id: i32) -> Result<Vec<EmployeeLeaf>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leaves = sqlx::query_as::<_, EmployeeLeaf>(
            r#"
            SELECT a.id AS assignment_id, d.id AS detail_id, d.email
            FROM employee_assignments a
            JOIN employee_details d ON d.id = a.employee_id
            WHERE a.designation_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(designation_id)
        .fetch_all(executor)
        .await?;
        Ok(leaves)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    pub async fn insert_details<'e, E>(
        &self,
        executor: E,
        name: &str,
        national_id: &str,
        start_date: NaiveDate,
        email: &str,
    ) -> Result<EmployeeDetails, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let details = sqlx::query_as::<_, EmployeeDetails>(
            r#"
            INSERT INTO employee_details (name, national_id, start_date, email)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(national_id)
        .bind(start_date)
        .bind(email)
        .fetch_one(executor)
        .await?;
        Ok(details)
    }

    /// Insere a alocação já como 'active'.
    pub async fn insert_assignment<'e, E>(
        &self,
        executor: E,
        detail_id: i32,
        assignment: &NewAssignment,
    ) -> Result<EmployeeAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, EmployeeAssignment>(
            r#"
            INSERT INTO employee_assignments (
                employee_id, section_id, designation_id, employment_type, status,
                work_start_time, work_end_time, salary, bonus
            )
            VALUES ($1, $2, $3, $4, 'active', $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(detail_id)
        .bind(assignment.section_id)
        .bind(assignment.designation_id)
        .bind(assignment.employment_type)
        .bind(assignment.work_start_time)
        .bind(assignment.work_end_time)
        .bind(assignment.salary)
        .bind(assignment.bonus)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    // Atualização parcial: só os campos enviados mudam (COALESCE mantém o resto)
    pub async fn update_assignment<'e, E>(
        &self,
        executor: E,
        assignment_id: i32,
        changes: &AssignmentChanges,
    ) -> Result<EmployeeAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, EmployeeAssignment>(
            r#"
            UPDATE employee_assignments SET
                section_id = COALESCE($2, section_id),
                designation_id = COALESCE($3, designation_id),
                employment_type = COALESCE($4, employment_type),
                work_start_time = COALESCE($5, work_start_time),
                work_end_time = COALESCE($6, work_end_time),
                salary = COALESCE($7, salary),
                bonus = COALESCE($8, bonus)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(assignment_id)
        .bind(changes.section_id)
        .bind(changes.designation_id)
        .bind(changes.employment_type)
        .bind(changes.work_start_time)
        .bind(changes.work_end_time)
        .bind(changes.salary)
        .bind(changes.bonus)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    /// Sobrescreve o 'changed' que o trigger aplica em mudanças de seção/cargo.
    pub async fn force_active<'e, E>(&self, executor: E, assignment_id: i32) -> Result<EmployeeAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, EmployeeAssignment>(
            "UPDATE employee_assignments SET status = 'active' WHERE id = $1 RETURNING *",
        )
        .bind(assignment_id)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn update_personal_info<'e, E>(
        &self,
        executor: E,
        detail_id: i32,
        changes: &PersonalInfoChanges,
    ) -> Result<EmployeeDetails, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, EmployeeDetails>(
            r#"
            UPDATE employee_details SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(detail_id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn set_barcode<'e, E>(
        &self,
        executor: E,
        detail_id: i32,
        barcode: Option<&str>,
    ) -> Result<Option<EmployeeDetails>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, EmployeeDetails>(
            "UPDATE employee_details SET barcode = $2 WHERE id = $1 RETURNING *",
        )
        .bind(detail_id)
        .bind(barcode)
        .fetch_optional(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete_assignment<'e, E>(&self, executor: E, assignment_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM employee_assignments WHERE id = $1")
            .bind(assignment_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_details<'e, E>(&self, executor: E, detail_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM employee_details WHERE id = $1")
            .bind(detail_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

// src/db/organization_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::organization::{Department, Designation, Role, Section},
};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DEPARTMENTS
    // =========================================================================

    pub async fn create_department(&self, name: &str) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(department)
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(departments)
    }

    pub async fn find_department(&self, id: i32) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(department)
    }

    pub async fn rename_department(&self, id: i32, name: &str) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }

    pub async fn delete_department<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  SECTIONS
    // =========================================================================

    pub async fn create_section(&self, name: &str, department_id: i32) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "INSERT INTO sections (name, department_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(section)
    }

    pub async fn list_sections(&self) -> Result<Vec<Section>, AppError> {
        let sections = sqlx::query_as::<_, Section>("SELECT * FROM sections ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(sections)
    }

    pub async fn find_section<'e, E>(&self, executor: E, id: i32) -> Result<Option<Section>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let section = sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(section)
    }

    pub async fn sections_of_department<'e, E>(&self, executor: E, department_id: i32) -> Result<Vec<Section>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE department_id = $1 ORDER BY id",
        )
        .bind(department_id)
        .fetch_all(executor)
        .await?;
        Ok(sections)
    }

    pub async fn update_section(&self, id: i32, name: &str, department_id: i32) -> Result<Option<Section>, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "UPDATE sections SET name = $2, department_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(section)
    }

    pub async fn delete_section<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ROLES
    // =========================================================================

    pub async fn create_role(&self, name: &str) -> Result<Role, AppError> {
        let role = sqlx::query_as::<_, Role>("INSERT INTO roles (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(role)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    pub async fn find_role<'e, E>(&self, executor: E, id: i32) -> Result<Option<Role>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(role)
    }

    pub async fn rename_role(&self, id: i32, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("UPDATE roles SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    pub async fn delete_role<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  DESIGNATIONS
    // =========================================================================

    pub async fn create_designation(&self, name: &str, role_id: Option<i32>) -> Result<Designation, AppError> {
        let designation = sqlx::query_as::<_, Designation>(
            "INSERT INTO designations (name, role_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(role_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(designation)
    }

    pub async fn list_designations(&self) -> Result<Vec<Designation>, AppError> {
        let designations = sqlx::query_as::<_, Designation>("SELECT * FROM designations ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(designations)
    }

    pub async fn find_designation<'e, E>(&self, executor: E, id: i32) -> Result<Option<Designation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let designation = sqlx::query_as::<_, Designation>("SELECT * FROM designations WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(designation)
    }

    pub async fn designations_of_role<'e, E>(&self, executor: E, role_id: i32) -> Result<Vec<Designation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let designations = sqlx::query_as::<_, Designation>(
            "SELECT * FROM designations WHERE role_id = $1 ORDER BY id",
        )
        .bind(role_id)
        .fetch_all(executor)
        .await?;
        Ok(designations)
    }

    pub async fn update_designation(
        &self,
        id: i32,
        name: &str,
        role_id: Option<i32>,
    ) -> Result<Option<Designation>, AppError> {
        let designation = sqlx::query_as::<_, Designation>(
            "UPDATE designations SET name = $2, role_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(designation)
    }

    pub async fn delete_designation<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM designations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

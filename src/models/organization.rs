// src/models/organization.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Department (topo da hierarquia)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Engineering")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. Section (pertence a um Department)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Backend")]
    pub name: String,
    pub department_id: i32,
    pub created_at: DateTime<Utc>,
}

// ---
// 3. Role (agrupa Designations)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Engineer")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Designation (o cargo; opcionalmente ligado a uma Role)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Senior Engineer")]
    pub name: String,
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub department_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignationPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub role_id: Option<i32>,
}

/// Contagem do que foi removido por uma exclusão em cascata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CascadeSummary {
    pub departments: u64,
    pub sections: u64,
    pub roles: u64,
    pub designations: u64,
    pub employees: u64,
    pub attendance_records: u64,
    pub leave_applications: u64,
    pub credentials: u64,
}

// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 42)]
    pub total_employees: i64,
    #[schema(example = 3)]
    pub unassigned_employees: i64,
    pub departments: i64,
    pub present_today: i64,
    pub pending_leaves: i64,
}

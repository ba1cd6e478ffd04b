// src/models/payroll.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayrollQuery {
    /// Mês de referência no formato `YYYY-MM`.
    #[schema(example = "2025-06")]
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub employee_id: i32,
    pub employee_name: String,
    #[schema(example = "2025-06")]
    pub month: String,
    pub base_salary: Decimal,
    pub bonus: Decimal,
    pub overtime_hours: Decimal,
    pub overtime_pay: Decimal,
    pub leave_days: i32,
    pub excess_leave_days: i32,
    pub leave_deduction: Decimal,
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

// src/models/employee.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Enums ---
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "employment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Fixed,
    #[default]
    Editable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    Changed,
}

// ---
// 1. EmployeeDetails (identidade, criada uma única vez na contratação)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "12345-6789012-3")]
    pub national_id: String,
    pub start_date: NaiveDate,
    #[schema(example = "john@x.com")]
    pub email: String,
    #[schema(example = "EMP001123")]
    pub barcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. EmployeeAssignment (registro operacional; ausente = funcionário não alocado)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAssignment {
    pub id: i32,
    pub employee_id: i32,
    pub section_id: i32,
    pub designation_id: i32,
    pub employment_type: EmploymentType,
    pub status: AssignmentStatus,
    pub work_start_time: NaiveTime,
    pub work_end_time: NaiveTime,
    #[schema(example = 50000.00)]
    pub salary: Decimal,
    pub bonus: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha "achatada" da listagem (LEFT JOIN): os campos da alocação são todos opcionais.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub detail_id: i32,
    pub name: String,
    pub national_id: String,
    pub start_date: NaiveDate,
    pub email: String,
    pub barcode: Option<String>,
    pub assignment_id: Option<i32>,
    pub section_id: Option<i32>,
    pub section_name: Option<String>,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub designation_id: Option<i32>,
    pub designation_name: Option<String>,
    pub role_id: Option<i32>,
    pub role_name: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub status: Option<AssignmentStatus>,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub salary: Option<Decimal>,
    pub bonus: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    pub assignment_id: i32,
    pub section_id: i32,
    pub section_name: String,
    pub department_id: i32,
    pub department_name: String,
    pub designation_id: i32,
    pub designation_name: String,
    pub role_id: Option<i32>,
    pub role_name: Option<String>,
    pub employment_type: EmploymentType,
    pub status: AssignmentStatus,
    pub work_start_time: NaiveTime,
    pub work_end_time: NaiveTime,
    pub salary: Decimal,
    pub bonus: Decimal,
}

/// Substitui o antigo "emp_id = 0": ou o funcionário tem alocação, ou não tem.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AssignmentState {
    Unassigned,
    Assigned(AssignmentView),
}

impl AssignmentState {
    pub fn assignment_id(&self) -> Option<i32> {
        match self {
            AssignmentState::Unassigned => None,
            AssignmentState::Assigned(view) => Some(view.assignment_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub detail_id: i32,
    pub name: String,
    pub national_id: String,
    pub start_date: NaiveDate,
    pub email: String,
    pub barcode: Option<String>,
    pub assignment: AssignmentState,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        // Só consideramos alocado quando todas as colunas obrigatórias vieram do JOIN.
        let assignment = match (
            row.assignment_id,
            row.section_id,
            row.section_name,
            row.department_id,
            row.department_name,
            row.designation_id,
            row.designation_name,
            row.employment_type,
            row.status,
            row.work_start_time,
            row.work_end_time,
            row.salary,
            row.bonus,
        ) {
            (
                Some(assignment_id),
                Some(section_id),
                Some(section_name),
                Some(department_id),
                Some(department_name),
                Some(designation_id),
                Some(designation_name),
                Some(employment_type),
                Some(status),
                Some(work_start_time),
                Some(work_end_time),
                Some(salary),
                Some(bonus),
            ) => AssignmentState::Assigned(AssignmentView {
                assignment_id,
                section_id,
                section_name,
                department_id,
                department_name,
                designation_id,
                designation_name,
                role_id: row.role_id,
                role_name: row.role_name,
                employment_type,
                status,
                work_start_time,
                work_end_time,
                salary,
                bonus,
            }),
            _ => AssignmentState::Unassigned,
        };

        Employee {
            detail_id: row.detail_id,
            name: row.name,
            national_id: row.national_id,
            start_date: row.start_date,
            email: row.email,
            barcode: row.barcode,
            assignment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentFilter {
    Assigned,
    Unassigned,
}

// --- Entradas de domínio (já validadas pelos handlers) ---

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub national_id: String,
    pub start_date: NaiveDate,
    pub email: String,
    pub password: Option<String>,
    pub assignment: Option<NewAssignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub section_id: i32,
    pub designation_id: i32,
    pub employment_type: EmploymentType,
    pub work_start_time: NaiveTime,
    pub work_end_time: NaiveTime,
    pub salary: Decimal,
    pub bonus: Decimal,
}

/// Atualização parcial: `None` = manter o valor atual.
#[derive(Debug, Clone, Default)]
pub struct AssignmentChanges {
    pub section_id: Option<i32>,
    pub designation_id: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    pub work_start_time: Option<NaiveTime>,
    pub work_end_time: Option<NaiveTime>,
    pub salary: Option<Decimal>,
    pub bonus: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonalInfoChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEmployee {
    pub detail_id: i32,
    pub assignment_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEmployee {
    pub detail_id: i32,
    pub assignment_id: Option<i32>,
    pub attendance_records: u64,
    pub leave_applications: u64,
    pub credentials: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn unassigned_row() -> EmployeeRow {
        EmployeeRow {
            detail_id: 7,
            name: "John Doe".into(),
            national_id: "12345-6789012-3".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            email: "john@x.com".into(),
            barcode: None,
            assignment_id: None,
            section_id: None,
            section_name: None,
            department_id: None,
            department_name: None,
            designation_id: None,
            designation_name: None,
            role_id: None,
            role_name: None,
            employment_type: None,
            status: None,
            work_start_time: None,
            work_end_time: None,
            salary: None,
            bonus: None,
        }
    }

    #[test]
    fn row_without_assignment_is_unassigned() {
        let employee = Employee::from(unassigned_row());
        assert_eq!(employee.assignment, AssignmentState::Unassigned);
        assert_eq!(employee.assignment.assignment_id(), None);

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["assignment"], serde_json::json!({ "state": "unassigned" }));
        assert_eq!(json["detailId"], 7);
    }

    #[test]
    fn row_with_assignment_is_assigned() {
        let row = EmployeeRow {
            assignment_id: Some(3),
            section_id: Some(1),
            section_name: Some("Backend".into()),
            department_id: Some(1),
            department_name: Some("Engineering".into()),
            designation_id: Some(1),
            designation_name: Some("Engineer".into()),
            role_id: Some(1),
            role_name: Some("Technical".into()),
            employment_type: Some(EmploymentType::Editable),
            status: Some(AssignmentStatus::Active),
            work_start_time: NaiveTime::from_hms_opt(9, 0, 0),
            work_end_time: NaiveTime::from_hms_opt(17, 0, 0),
            salary: Decimal::from_f64(50000.0),
            bonus: Some(Decimal::ZERO),
            ..unassigned_row()
        };
        let employee = Employee::from(row);
        assert_eq!(employee.assignment.assignment_id(), Some(3));

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["assignment"]["state"], "assigned");
        assert_eq!(json["assignment"]["status"], "Active");
        assert_eq!(json["assignment"]["employmentType"], "editable");
    }
}

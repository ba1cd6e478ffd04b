// src/models/attendance.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[serde(alias = "present")]
    Present,
    #[serde(alias = "absent")]
    Absent,
    #[serde(alias = "late")]
    Late,
    #[serde(rename = "Half Day", alias = "half_day")]
    HalfDay,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::HalfDay => "Half Day",
        }
    }
}

// Registro de presença: um por (funcionário, dia)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i32,
    pub employee_id: i32,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub hours_worked: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registro de presença com o nome do funcionário (listagens).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub hours_worked: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UpsertAction {
    Added,
    Updated,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceUpsert {
    pub action: UpsertAction,
    pub record: Attendance,
}

/// Entrada do upsert (já validada).
#[derive(Debug, Clone)]
pub struct AttendanceInput {
    pub employee_id: i32,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub notes: Option<String>,
}

/// Funcionário ativo encontrado pelo código de barras.
#[derive(Debug, Clone, FromRow)]
pub struct BarcodeHolder {
    pub assignment_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeOutcome {
    Marked { employee_name: String },
    AlreadyMarked { employee_name: String, date: NaiveDate, status: AttendanceStatus },
    NotFound,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeResponse {
    pub success: bool,
    pub message: String,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub date: Option<NaiveDate>,
    pub employee_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Horas trabalhadas entre entrada e saída, com duas casas decimais.
/// Saída antes da entrada é tratada como turno que atravessa a meia-noite.
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> Decimal {
    let mut seconds = (check_out - check_in).num_seconds();
    if seconds < 0 {
        seconds += 24 * 3600;
    }
    (Decimal::from(seconds) / Decimal::from(3600)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn hours_between_rounds_to_two_places() {
        assert_eq!(hours_between(t(9, 0), t(17, 0)), Decimal::from(8));
        assert_eq!(hours_between(t(9, 0), t(9, 20)), Decimal::from_str("0.33").unwrap());
        assert_eq!(hours_between(t(22, 0), t(6, 0)), Decimal::from(8));
    }

    #[test]
    fn status_accepts_labels_and_snake_case() {
        let s: AttendanceStatus = serde_json::from_str("\"Half Day\"").unwrap();
        assert_eq!(s, AttendanceStatus::HalfDay);
        let s: AttendanceStatus = serde_json::from_str("\"half_day\"").unwrap();
        assert_eq!(s, AttendanceStatus::HalfDay);
        let s: AttendanceStatus = serde_json::from_str("\"present\"").unwrap();
        assert_eq!(s, AttendanceStatus::Present);
        assert_eq!(serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(), "\"Half Day\"");
        assert_eq!(AttendanceStatus::Late.label(), "Late");
    }
}

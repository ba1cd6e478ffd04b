// src/models/leave.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    ShortLeave,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Viewed,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Viewed => "viewed",
        }
    }

    /// Status que um aprovador pode atribuir. `pending` é só o estado inicial.
    pub fn parse_decision(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            "viewed" => Ok(LeaveStatus::Viewed),
            _ => Err(AppError::InvalidLeaveStatus(raw.to_string())),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }

    /// approved/rejected são finais; repetir o mesmo status é aceito (idempotente).
    pub fn check_transition(self, to: LeaveStatus) -> Result<(), AppError> {
        if self.is_terminal() && self != to {
            return Err(AppError::LeaveTransitionNotAllowed {
                from: self.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        Ok(())
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub id: i32,
    pub employee_id: i32,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: i32,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<Uuid>,
    pub approved_date: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLeave {
    pub employee_id: i32,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveQuery {
    pub employee_id: Option<i32>,
    pub status: Option<LeaveStatus>,
}

/// Quantidade de dias, contando o primeiro e o último.
pub fn days_requested(start: NaiveDate, end: NaiveDate) -> Result<i32, AppError> {
    if end < start {
        return Err(AppError::InvalidDateRange);
    }
    let days = (end - start).num_days() + 1;
    i32::try_from(days).map_err(|_| AppError::InvalidDateRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(days_requested(d(2025, 1, 1), d(2025, 1, 3)).unwrap(), 3);
        assert_eq!(days_requested(d(2025, 1, 1), d(2025, 1, 1)).unwrap(), 1);
        assert_eq!(days_requested(d(2024, 2, 28), d(2024, 3, 1)).unwrap(), 3);
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(matches!(
            days_requested(d(2025, 1, 3), d(2025, 1, 1)),
            Err(AppError::InvalidDateRange)
        ));
    }

    #[test]
    fn only_decisions_are_accepted_as_new_status() {
        assert_eq!(LeaveStatus::parse_decision("approved").unwrap(), LeaveStatus::Approved);
        assert_eq!(LeaveStatus::parse_decision("Rejected").unwrap(), LeaveStatus::Rejected);
        assert_eq!(LeaveStatus::parse_decision("viewed").unwrap(), LeaveStatus::Viewed);
        assert!(matches!(
            LeaveStatus::parse_decision("pending"),
            Err(AppError::InvalidLeaveStatus(_))
        ));
        assert!(LeaveStatus::parse_decision("cancelled").is_err());
    }

    #[test]
    fn decided_leaves_are_final() {
        use LeaveStatus::*;
        assert!(Pending.check_transition(Approved).is_ok());
        assert!(Pending.check_transition(Viewed).is_ok());
        assert!(Viewed.check_transition(Rejected).is_ok());
        assert!(Approved.check_transition(Approved).is_ok());
        assert!(Approved.check_transition(Rejected).is_err());
        assert!(Rejected.check_transition(Viewed).is_err());

        assert!(Pending.is_deletable());
        assert!(Viewed.is_deletable());
        assert!(!Approved.is_deletable());
    }
}

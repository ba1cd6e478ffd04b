// src/services/payroll_service.rs

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::{AttendanceRepository, EmployeeRepository, LeaveRepository, PolicyRepository},
    models::{
        attendance::{hours_between, Attendance},
        employee::{AssignmentState, Employee},
        leave::LeaveApplication,
        payroll::Payslip,
        policy::{LeavePolicy, OvertimePolicy, TaxPolicy},
    },
};

/// Dias úteis considerados num mês para o salário diário.
pub const WORKING_DAYS_PER_MONTH: i64 = 22;

/// Período de referência da folha (um mês civil).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl PayPeriod {
    /// Aceita `YYYY-MM`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidInput(format!("month must be YYYY-MM, got '{}'", raw));

        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last_day = next_month.pred_opt().ok_or_else(invalid)?;

        Ok(Self { first_day, last_day })
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.first_day.year(), self.first_day.month())
    }

    /// Dias da licença que caem dentro do período.
    pub fn overlap_days(&self, start: NaiveDate, end: NaiveDate) -> i32 {
        let from = start.max(self.first_day);
        let to = end.min(self.last_day);
        if to < from {
            return 0;
        }
        ((to - from).num_days() + 1) as i32
    }
}

/// Tudo o que o cálculo precisa, já carregado do banco.
pub struct PayrollInputs<'a> {
    pub employee_id: i32,
    pub employee_name: &'a str,
    pub period: PayPeriod,
    pub salary: Decimal,
    pub bonus: Decimal,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub attendance: &'a [Attendance],
    pub leaves: &'a [LeaveApplication],
    pub overtime: &'a OvertimePolicy,
    pub leave_policy: &'a LeavePolicy,
    pub tax: &'a TaxPolicy,
}

/// Cálculo puro do contracheque.
pub fn compute_payslip(input: &PayrollInputs<'_>) -> Payslip {
    let daily_rate = input.salary / Decimal::from(WORKING_DAYS_PER_MONTH);
    let scheduled_hours = hours_between(input.work_start, input.work_end);
    let hourly_rate = if scheduled_hours.is_zero() {
        Decimal::ZERO
    } else {
        daily_rate / scheduled_hours
    };

    // Horas extras: o que passou da jornada prevista em cada dia
    let overtime_hours: Decimal = input
        .attendance
        .iter()
        .filter_map(|record| record.hours_worked)
        .map(|worked| (worked - scheduled_hours).max(Decimal::ZERO))
        .sum();

    let overtime_pay = if input.overtime.allowed {
        let multiplier = if input.overtime.bonus_enabled {
            input.overtime.bonus_rate
        } else {
            Decimal::ONE
        };
        overtime_hours * hourly_rate * multiplier
    } else {
        Decimal::ZERO
    };

    let leave_days: i32 = input
        .leaves
        .iter()
        .map(|leave| input.period.overlap_days(leave.start_date, leave.end_date))
        .sum();
    let excess_leave_days = (leave_days - input.leave_policy.max_per_month).max(0);
    let leave_deduction = if input.leave_policy.deduction_enabled {
        Decimal::from(excess_leave_days) * daily_rate * input.leave_policy.deduction_rate
    } else {
        Decimal::ZERO
    };

    let gross = (input.salary + input.bonus + overtime_pay - leave_deduction).max(Decimal::ZERO);

    let tax = if input.tax.enabled && gross > input.tax.exemption_limit {
        (gross - input.tax.exemption_limit) * input.tax.rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let gross = gross.round_dp(2);
    let tax = tax.round_dp(2);

    Payslip {
        employee_id: input.employee_id,
        employee_name: input.employee_name.to_string(),
        month: input.period.label(),
        base_salary: input.salary.round_dp(2),
        bonus: input.bonus.round_dp(2),
        overtime_hours: overtime_hours.round_dp(2),
        overtime_pay: overtime_pay.round_dp(2),
        leave_days,
        excess_leave_days,
        leave_deduction: leave_deduction.round_dp(2),
        gross,
        tax,
        net: gross - tax,
    }
}

#[derive(Clone)]
pub struct PayrollService {
    employee_repo: EmployeeRepository,
    attendance_repo: AttendanceRepository,
    leave_repo: LeaveRepository,
    policy_repo: PolicyRepository,
    pool: PgPool,
}

impl PayrollService {
    pub fn new(
        employee_repo: EmployeeRepository,
        attendance_repo: AttendanceRepository,
        leave_repo: LeaveRepository,
        policy_repo: PolicyRepository,
        pool: PgPool,
    ) -> Self {
        Self { employee_repo, attendance_repo, leave_repo, policy_repo, pool }
    }

    /// Prévia do contracheque de um funcionário alocado (id da alocação).
    pub async fn preview(&self, employee_id: i32, month: &str) -> Result<Payslip, AppError> {
        let period = PayPeriod::parse(month)?;

        let employee: Employee = self
            .employee_repo
            .find_row_by_assignment(employee_id)
            .await?
            .map(Employee::from)
            .ok_or(AppError::NotFound("employee"))?;
        let AssignmentState::Assigned(assignment) = &employee.assignment else {
            return Err(AppError::NotFound("employee"));
        };

        // REPEATABLE READ: as leituras abaixo compartilham um snapshot
        let mut tx = begin_transaction(&self.pool).await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        let attendance = self
            .attendance_repo
            .for_employee_between(&mut *tx, employee_id, period.first_day, period.last_day)
            .await?;
        let leaves = self
            .leave_repo
            .approved_overlapping(&mut *tx, employee_id, period.first_day, period.last_day)
            .await?;
        let overtime = self.policy_repo.get_overtime(&mut *tx).await?;
        let leave_policy = self.policy_repo.get_leave(&mut *tx).await?;
        let tax = self.policy_repo.get_tax(&mut *tx).await?;
        tx.commit().await?;

        Ok(compute_payslip(&PayrollInputs {
            employee_id,
            employee_name: &employee.name,
            period,
            salary: assignment.salary,
            bonus: assignment.bonus,
            work_start: assignment.work_start_time,
            work_end: assignment.work_end_time,
            attendance: &attendance,
            leaves: &leaves,
            overtime: &overtime,
            leave_policy: &leave_policy,
            tax: &tax,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        attendance::AttendanceStatus,
        leave::{LeaveStatus, LeaveType},
    };
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn worked(day: u32, hours: i64) -> Attendance {
        Attendance {
            id: day as i32,
            employee_id: 1,
            date: d(2025, 6, day),
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Present,
            hours_worked: Some(Decimal::from(hours)),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn approved(start: NaiveDate, end: NaiveDate) -> LeaveApplication {
        LeaveApplication {
            id: 1,
            employee_id: 1,
            leave_type: LeaveType::Holiday,
            start_date: start,
            end_date: end,
            days_requested: 0,
            reason: "family".into(),
            status: LeaveStatus::Approved,
            approved_by: None,
            approved_date: None,
            comments: None,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn period_parses_month_bounds() {
        let june = PayPeriod::parse("2025-06").unwrap();
        assert_eq!(june.first_day, d(2025, 6, 1));
        assert_eq!(june.last_day, d(2025, 6, 30));
        assert_eq!(june.label(), "2025-06");

        let feb = PayPeriod::parse("2024-02").unwrap();
        assert_eq!(feb.last_day, d(2024, 2, 29));

        let dec = PayPeriod::parse("2025-12").unwrap();
        assert_eq!(dec.last_day, d(2025, 12, 31));

        assert!(PayPeriod::parse("2025-13").is_err());
        assert!(PayPeriod::parse("junho").is_err());
    }

    #[test]
    fn leave_overlap_is_clipped_to_the_month() {
        let june = PayPeriod::parse("2025-06").unwrap();
        assert_eq!(june.overlap_days(d(2025, 5, 30), d(2025, 6, 2)), 2);
        assert_eq!(june.overlap_days(d(2025, 6, 10), d(2025, 6, 12)), 3);
        assert_eq!(june.overlap_days(d(2025, 7, 1), d(2025, 7, 2)), 0);
    }

    #[test]
    fn payslip_applies_all_three_policies() {
        let attendance = vec![worked(2, 10), worked(3, 8), worked(4, 9)];
        let leaves = vec![approved(d(2025, 6, 10), d(2025, 6, 13))];
        let overtime = OvertimePolicy {
            allowed: true,
            bonus_enabled: true,
            bonus_rate: Decimal::new(15, 1),
            ..Default::default()
        };
        let leave_policy = LeavePolicy {
            deduction_enabled: true,
            max_per_month: 2,
            deduction_rate: Decimal::ONE,
            ..Default::default()
        };
        let tax = TaxPolicy {
            enabled: true,
            rate: Decimal::from(10),
            exemption_limit: Decimal::from(40000),
            ..Default::default()
        };

        // 44000 / 22 = 2000 por dia; jornada de 8h => 250 por hora
        let slip = compute_payslip(&PayrollInputs {
            employee_id: 1,
            employee_name: "John Doe",
            period: PayPeriod::parse("2025-06").unwrap(),
            salary: Decimal::from(44000),
            bonus: Decimal::from(1000),
            work_start: t(9),
            work_end: t(17),
            attendance: &attendance,
            leaves: &leaves,
            overtime: &overtime,
            leave_policy: &leave_policy,
            tax: &tax,
        });

        assert_eq!(slip.overtime_hours, Decimal::from(3));
        assert_eq!(slip.overtime_pay, Decimal::from(1125));
        assert_eq!(slip.leave_days, 4);
        assert_eq!(slip.excess_leave_days, 2);
        assert_eq!(slip.leave_deduction, Decimal::from(4000));
        assert_eq!(slip.gross, Decimal::from(42125));
        assert_eq!(slip.tax, Decimal::new(2125, 1));
        assert_eq!(slip.net, Decimal::new(419125, 1));
    }

    #[test]
    fn disabled_policies_leave_salary_untouched() {
        let attendance = vec![worked(2, 12)];
        let leaves = vec![approved(d(2025, 6, 1), d(2025, 6, 20))];
        let slip = compute_payslip(&PayrollInputs {
            employee_id: 1,
            employee_name: "Jane",
            period: PayPeriod::parse("2025-06").unwrap(),
            salary: Decimal::from(50000),
            bonus: Decimal::ZERO,
            work_start: t(9),
            work_end: t(17),
            attendance: &attendance,
            leaves: &leaves,
            overtime: &OvertimePolicy::default(),
            leave_policy: &LeavePolicy::default(),
            tax: &TaxPolicy::default(),
        });

        assert_eq!(slip.overtime_pay, Decimal::ZERO);
        assert_eq!(slip.leave_deduction, Decimal::ZERO);
        assert_eq!(slip.tax, Decimal::ZERO);
        assert_eq!(slip.net, Decimal::from(50000));
    }
}

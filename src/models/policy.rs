// src/models/policy.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// As políticas são singletons: uma linha por empresa, sempre a empresa 1.
pub const COMPANY_ID: i32 = 1;

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value must not be negative.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    validate_not_negative(val)?;
    if *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &100.0);
        err.message = Some("The rate is a percentage and must not exceed 100.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Horas extras
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OvertimePolicy {
    #[schema(ignore)]
    pub company_id: i32,
    pub allowed: bool,
    pub bonus_enabled: bool,
    /// Multiplicador aplicado à hora extra quando o bônus está ativo.
    #[schema(example = 1.5)]
    pub bonus_rate: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            company_id: COMPANY_ID,
            allowed: false,
            bonus_enabled: false,
            bonus_rate: Decimal::ONE,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOvertimePolicy {
    pub allowed: bool,
    pub bonus_enabled: bool,
    #[validate(custom(function = "validate_not_negative"))]
    pub bonus_rate: Decimal,
}

// ---
// Licenças
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeavePolicy {
    #[schema(ignore)]
    pub company_id: i32,
    pub deduction_enabled: bool,
    #[schema(example = 2)]
    pub max_per_month: i32,
    #[schema(example = 24)]
    pub max_per_year: i32,
    /// Fração do salário diário descontada por dia excedente.
    pub deduction_rate: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            company_id: COMPANY_ID,
            deduction_enabled: false,
            max_per_month: 2,
            max_per_year: 24,
            deduction_rate: Decimal::ONE,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeavePolicy {
    pub deduction_enabled: bool,
    #[validate(range(min = 0, message = "The monthly limit must not be negative."))]
    pub max_per_month: i32,
    #[validate(range(min = 0, message = "The yearly limit must not be negative."))]
    pub max_per_year: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub deduction_rate: Decimal,
}

// ---
// Imposto
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxPolicy {
    #[schema(ignore)]
    pub company_id: i32,
    pub enabled: bool,
    /// Percentual (0–100) aplicado sobre o que excede o limite de isenção.
    #[schema(example = 10.0)]
    pub rate: Decimal,
    pub exemption_limit: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            company_id: COMPANY_ID,
            enabled: false,
            rate: Decimal::ZERO,
            exemption_limit: Decimal::ZERO,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaxPolicy {
    pub enabled: bool,
    #[validate(custom(function = "validate_percentage"))]
    pub rate: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub exemption_limit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tax_rate_is_a_percentage() {
        let ok = UpdateTaxPolicy {
            enabled: true,
            rate: Decimal::from(15),
            exemption_limit: Decimal::from(40000),
        };
        assert!(ok.validate().is_ok());

        let too_high = UpdateTaxPolicy { rate: Decimal::from(101), ..ok };
        let errors = too_high.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rate"));
    }

    #[test]
    fn negative_rates_are_rejected() {
        let payload = UpdateOvertimePolicy {
            allowed: true,
            bonus_enabled: true,
            bonus_rate: Decimal::from_str("-0.5").unwrap(),
        };
        assert!(payload.validate().is_err());

        let payload = UpdateLeavePolicy {
            deduction_enabled: true,
            max_per_month: -1,
            max_per_year: 10,
            deduction_rate: Decimal::ONE,
        };
        assert!(payload.validate().unwrap_err().field_errors().contains_key("max_per_month"));
    }

    #[test]
    fn defaults_belong_to_the_single_company() {
        assert_eq!(OvertimePolicy::default().company_id, COMPANY_ID);
        assert_eq!(LeavePolicy::default().max_per_month, 2);
        assert!(!TaxPolicy::default().enabled);
    }
}

// src/handlers/policies.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{AdminOnly, RequireRole},
    },
    models::policy::{
        LeavePolicy, OvertimePolicy, TaxPolicy, UpdateLeavePolicy, UpdateOvertimePolicy,
        UpdateTaxPolicy,
    },
};

// GET /api/policies/overtime
#[utoipa::path(
    get,
    path = "/api/policies/overtime",
    tag = "Policies",
    responses((status = 200, description = "Política de horas extras", body = OvertimePolicy)),
    security(("api_jwt" = []))
)]
pub async fn get_overtime_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .get_overtime()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// PUT /api/policies/overtime
#[utoipa::path(
    put,
    path = "/api/policies/overtime",
    tag = "Policies",
    request_body = UpdateOvertimePolicy,
    responses(
        (status = 200, description = "Política salva", body = OvertimePolicy),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_overtime_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<UpdateOvertimePolicy>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let policy = app_state
        .policy_service
        .update_overtime(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// GET /api/policies/leave
#[utoipa::path(
    get,
    path = "/api/policies/leave",
    tag = "Policies",
    responses((status = 200, description = "Política de licenças", body = LeavePolicy)),
    security(("api_jwt" = []))
)]
pub async fn get_leave_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .get_leave()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// PUT /api/policies/leave
#[utoipa::path(
    put,
    path = "/api/policies/leave",
    tag = "Policies",
    request_body = UpdateLeavePolicy,
    responses(
        (status = 200, description = "Política salva", body = LeavePolicy),
        (status = 400, description = "Limite mensal maior que o anual"),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_leave_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<UpdateLeavePolicy>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let policy = app_state
        .policy_service
        .update_leave(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// GET /api/policies/tax
#[utoipa::path(
    get,
    path = "/api/policies/tax",
    tag = "Policies",
    responses((status = 200, description = "Política de imposto", body = TaxPolicy)),
    security(("api_jwt" = []))
)]
pub async fn get_tax_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let policy = app_state
        .policy_service
        .get_tax()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// PUT /api/policies/tax
#[utoipa::path(
    put,
    path = "/api/policies/tax",
    tag = "Policies",
    request_body = UpdateTaxPolicy,
    responses(
        (status = 200, description = "Política salva", body = TaxPolicy),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tax_policy(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<UpdateTaxPolicy>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let policy = app_state
        .policy_service
        .update_tax(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(policy))
}

// src/handlers/leaves.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::leave::{LeaveApplication, LeaveQuery, LeaveType, NewLeave},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeavePayload {
    #[validate(required(message = "The field 'employeeId' is required."))]
    pub employee_id: Option<i32>,
    #[validate(required(message = "The field 'leaveType' is required."))]
    pub leave_type: Option<LeaveType>,
    #[validate(required(message = "The field 'startDate' is required."))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "The field 'endDate' is required."))]
    pub end_date: Option<NaiveDate>,
    #[validate(
        required(message = "The field 'reason' is required."),
        length(min = 1, max = 1000, message = "The reason must not be empty.")
    )]
    pub reason: Option<String>,
}

impl ApplyLeavePayload {
    fn into_new_leave(self) -> Result<NewLeave, AppError> {
        match (self.employee_id, self.leave_type, self.start_date, self.end_date, self.reason) {
            (Some(employee_id), Some(leave_type), Some(start_date), Some(end_date), Some(reason))
                if !reason.trim().is_empty() =>
            {
                Ok(NewLeave {
                    employee_id,
                    leave_type,
                    start_date,
                    end_date,
                    reason: reason.trim().to_string(),
                })
            }
            _ => Err(AppError::InvalidInput("incomplete leave application".into())),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaveStatusPayload {
    /// approved, rejected ou viewed.
    #[validate(length(min = 1, message = "The field 'status' is required."))]
    #[schema(example = "approved")]
    pub status: String,
    #[validate(length(max = 1000))]
    pub comments: Option<String>,
}

// POST /api/leaves
#[utoipa::path(
    post,
    path = "/api/leaves",
    tag = "Leaves",
    request_body = ApplyLeavePayload,
    responses(
        (status = 201, description = "Pedido registrado como pending", body = LeaveApplication),
        (status = 400, description = "Datas inválidas ou funcionário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn apply_leave(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<ApplyLeavePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let new_leave = payload
        .into_new_leave()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let leave = app_state
        .leave_service
        .apply(new_leave)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(leave)))
}

// GET /api/leaves
#[utoipa::path(
    get,
    path = "/api/leaves",
    tag = "Leaves",
    params(
        ("employeeId" = Option<i32>, Query, description = "ID da alocação"),
        ("status" = Option<String>, Query, description = "pending, approved, rejected ou viewed")
    ),
    responses((status = 200, description = "Pedidos de licença", body = Vec<LeaveApplication>)),
    security(("api_jwt" = []))
)]
pub async fn list_leaves(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<LeaveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let leaves = app_state
        .leave_service
        .list(&query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(leaves))
}

// GET /api/leaves/{id}
#[utoipa::path(
    get,
    path = "/api/leaves/{id}",
    tag = "Leaves",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = LeaveApplication),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_leave(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let leave = app_state
        .leave_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(leave))
}

// PUT /api/leaves/{id}/status
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/status",
    tag = "Leaves",
    params(("id" = i32, Path, description = "ID do pedido")),
    request_body = UpdateLeaveStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = LeaveApplication),
        (status = 400, description = "Status inválido ou pedido já decidido"),
        (status = 403, description = "Apenas admin/hr"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_leave_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    AuthenticatedUser(approver): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLeaveStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let comments = payload.comments.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let leave = app_state
        .leave_service
        .update_status(id, &payload.status, &approver, comments)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(leave))
}

// DELETE /api/leaves/{id}
#[utoipa::path(
    delete,
    path = "/api/leaves/{id}",
    tag = "Leaves",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido"),
        (status = 400, description = "Pedido já decidido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_leave(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .leave_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_reason_is_rejected() {
        let payload: ApplyLeavePayload = serde_json::from_value(json!({
            "employeeId": 1,
            "leaveType": "holiday",
            "startDate": "2025-06-02",
            "endDate": "2025-06-04",
            "reason": "   "
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(matches!(payload.into_new_leave(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn missing_dates_fail_validation() {
        let payload: ApplyLeavePayload = serde_json::from_value(json!({
            "employeeId": 1,
            "leaveType": "short_leave",
            "reason": "Dentist"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("start_date"));
        assert!(errors.field_errors().contains_key("end_date"));
    }

    #[test]
    fn complete_payload_becomes_new_leave() {
        let payload: ApplyLeavePayload = serde_json::from_value(json!({
            "employeeId": 7,
            "leaveType": "short_leave",
            "startDate": "2025-06-02",
            "endDate": "2025-06-02",
            "reason": " Dentist "
        }))
        .unwrap();
        let leave = payload.into_new_leave().unwrap();
        assert_eq!(leave.employee_id, 7);
        assert_eq!(leave.leave_type, LeaveType::ShortLeave);
        assert_eq!(leave.reason, "Dentist");
    }
}

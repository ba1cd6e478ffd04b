// src/handlers/attendance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
        time::try_parse_time_of_day,
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::attendance::{
        Attendance, AttendanceEntry, AttendanceInput, AttendanceQuery, AttendanceStatus,
        AttendanceUpsert, BarcodeOutcome, BarcodeResponse,
    },
};

// Aqui o horário é estrito: ao contrário da jornada, não há padrão para cair
fn validate_time_of_day(raw: &str) -> Result<(), ValidationError> {
    if try_parse_time_of_day(raw).is_none() {
        let mut err = ValidationError::new("time_of_day");
        err.message = Some("Expected a time in the format H:MM or H:MM:SS.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAttendancePayload {
    #[validate(required(message = "The field 'employeeId' is required."))]
    pub employee_id: Option<i32>,
    #[validate(required(message = "The field 'date' is required."))]
    pub date: Option<NaiveDate>,
    #[validate(required(message = "The field 'status' is required."))]
    pub status: Option<AttendanceStatus>,
    #[validate(custom(function = "validate_time_of_day"))]
    #[schema(example = "09:05")]
    pub check_in: Option<String>,
    #[validate(custom(function = "validate_time_of_day"))]
    #[schema(example = "17:10")]
    pub check_out: Option<String>,
    #[validate(length(max = 500, message = "Notes must have at most 500 characters."))]
    pub notes: Option<String>,
}

impl UpsertAttendancePayload {
    fn into_input(self) -> Result<AttendanceInput, AppError> {
        let (Some(employee_id), Some(date), Some(status)) = (self.employee_id, self.date, self.status) else {
            return Err(AppError::InvalidInput("employeeId, date and status are required".into()));
        };

        Ok(AttendanceInput {
            employee_id,
            date,
            status,
            check_in: self.check_in.as_deref().and_then(try_parse_time_of_day),
            check_out: self.check_out.as_deref().and_then(try_parse_time_of_day),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeCheckInPayload {
    #[validate(length(min = 1, message = "The barcode is required."))]
    #[schema(example = "EMP001123")]
    pub barcode: String,
    /// Padrão: hoje.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutPayload {
    /// Padrão: agora.
    #[validate(custom(function = "validate_time_of_day"))]
    pub check_out: Option<String>,
}

/// "Já marcado" e "não encontrado" são respostas 200 com `success: false`.
pub fn barcode_response(outcome: BarcodeOutcome, lang: &str, store: &I18nStore) -> BarcodeResponse {
    match outcome {
        BarcodeOutcome::Marked { employee_name } => BarcodeResponse {
            success: true,
            message: store.translate(lang, "barcode.marked", &[("name", employee_name.clone())]),
            employee_name: Some(employee_name),
        },
        BarcodeOutcome::AlreadyMarked { employee_name, date, status } => BarcodeResponse {
            success: false,
            message: store.translate(
                lang,
                "barcode.already_marked",
                &[
                    ("name", employee_name.clone()),
                    ("date", date.to_string()),
                    ("status", status.label().to_string()),
                ],
            ),
            employee_name: Some(employee_name),
        },
        BarcodeOutcome::NotFound => BarcodeResponse {
            success: false,
            message: store.translate(lang, "barcode.not_found", &[]),
            employee_name: None,
        },
    }
}

// POST /api/attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    tag = "Attendance",
    request_body = UpsertAttendancePayload,
    responses(
        (status = 200, description = "Registro criado (added) ou atualizado (updated)", body = AttendanceUpsert),
        (status = 400, description = "Payload inválido ou funcionário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<UpsertAttendancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let input = payload
        .into_input()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let upsert = app_state
        .attendance_service
        .upsert(input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(upsert))
}

// POST /api/attendance/barcode
#[utoipa::path(
    post,
    path = "/api/attendance/barcode",
    tag = "Attendance",
    request_body = BarcodeCheckInPayload,
    responses(
        (status = 200, description = "Resultado da leitura (ver `success`)", body = BarcodeResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn barcode_check_in(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<BarcodeCheckInPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .attendance_service
        .barcode_check_in(&payload.barcode, payload.date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(barcode_response(outcome, &locale.0, &app_state.i18n_store))))
}

// GET /api/attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    params(
        ("date" = Option<NaiveDate>, Query, description = "Dia exato"),
        ("employeeId" = Option<i32>, Query, description = "ID da alocação"),
        ("from" = Option<NaiveDate>, Query, description = "Início do intervalo"),
        ("to" = Option<NaiveDate>, Query, description = "Fim do intervalo")
    ),
    responses((status = 200, description = "Registros de presença", body = Vec<AttendanceEntry>)),
    security(("api_jwt" = []))
)]
pub async fn list_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<AttendanceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = app_state
        .attendance_service
        .list(&query)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(entries))
}

// PUT /api/attendance/{id}/check-out
#[utoipa::path(
    put,
    path = "/api/attendance/{id}/check-out",
    tag = "Attendance",
    params(("id" = i32, Path, description = "ID do registro")),
    request_body = CheckOutPayload,
    responses(
        (status = 200, description = "Saída registrada", body = Attendance),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_out(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CheckOutPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let at = payload.check_out.as_deref().and_then(try_parse_time_of_day);
    let record = app_state
        .attendance_service
        .check_out(id, at)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(record))
}

// DELETE /api/attendance/{id}
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    params(("id" = i32, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .attendance_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

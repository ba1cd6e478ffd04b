// src/handlers/payroll.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::payroll::{PayrollQuery, Payslip},
};

// GET /api/payroll/{employee_id}?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/payroll/{employee_id}",
    tag = "Payroll",
    params(
        ("employee_id" = i32, Path, description = "ID da alocação"),
        ("month" = String, Query, description = "Mês de referência (YYYY-MM)")
    ),
    responses(
        (status = 200, description = "Prévia do contracheque", body = Payslip),
        (status = 400, description = "Mês inválido"),
        (status = 404, description = "Funcionário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_payslip(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(employee_id): Path<i32>,
    Query(query): Query<PayrollQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let payslip = app_state
        .payroll_service
        .preview(employee_id, &query.month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(payslip))
}

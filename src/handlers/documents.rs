// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
};

// GET /api/employees/det/{detail_id}/badge
#[utoipa::path(
    get,
    path = "/api/employees/det/{detail_id}/badge",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID dos dados pessoais")),
    responses(
        (status = 200, description = "Crachá em PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Funcionário sem código de barras"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn employee_badge(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(detail_id): Path<i32>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .employee_badge_pdf(detail_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"cracha_{}.pdf\"", detail_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// src/handlers/organization.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::organization::{
        CascadeSummary, Department, DepartmentPayload, Designation, DesignationPayload, Role,
        RolePayload, Section, SectionPayload,
    },
};

// ---
// DEPARTMENTS
// ---

#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "Organization",
    request_body = DepartmentPayload,
    responses(
        (status = 201, description = "Departamento criado", body = Department),
        (status = 400, description = "Nome inválido ou duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<DepartmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let department = app_state
        .organization_service
        .create_department(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Organization",
    responses((status = 200, description = "Departamentos", body = Vec<Department>)),
    security(("api_jwt" = []))
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let departments = app_state
        .organization_service
        .list_departments()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(departments))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento", body = Department),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let department = app_state
        .organization_service
        .get_department(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(department))
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do departamento")),
    request_body = DepartmentPayload,
    responses(
        (status = 200, description = "Departamento atualizado", body = Department),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
    Json(payload): Json<DepartmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let department = app_state
        .organization_service
        .update_department(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(department))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento removido em cascata", body = CascadeSummary),
        (status = 400, description = "Ainda referenciado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_department(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .organization_service
        .delete_department(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// ---
// SECTIONS
// ---

#[utoipa::path(
    post,
    path = "/api/sections",
    tag = "Organization",
    request_body = SectionPayload,
    responses(
        (status = 201, description = "Seção criada", body = Section),
        (status = 400, description = "Departamento inexistente ou nome duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_section(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let section = app_state
        .organization_service
        .create_section(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/sections",
    tag = "Organization",
    responses((status = 200, description = "Seções", body = Vec<Section>)),
    security(("api_jwt" = []))
)]
pub async fn list_sections(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let sections = app_state
        .organization_service
        .list_sections()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(sections))
}

#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da seção")),
    responses(
        (status = 200, description = "Seção", body = Section),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_section(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let section = app_state
        .organization_service
        .get_section(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(section))
}

#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da seção")),
    request_body = SectionPayload,
    responses(
        (status = 200, description = "Seção atualizada", body = Section),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_section(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let section = app_state
        .organization_service
        .update_section(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(section))
}

#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da seção")),
    responses(
        (status = 200, description = "Seção removida em cascata", body = CascadeSummary),
        (status = 400, description = "Ainda referenciada"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_section(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .organization_service
        .delete_section(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// ---
// ROLES
// ---

#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Organization",
    request_body = RolePayload,
    responses(
        (status = 201, description = "Função criada", body = Role),
        (status = 400, description = "Nome inválido ou duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<RolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let role = app_state
        .organization_service
        .create_role(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Organization",
    responses((status = 200, description = "Funções", body = Vec<Role>)),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let roles = app_state
        .organization_service
        .list_roles()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(roles))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da função")),
    responses(
        (status = 200, description = "Função", body = Role),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .organization_service
        .get_role(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(role))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da função")),
    request_body = RolePayload,
    responses(
        (status = 200, description = "Função atualizada", body = Role),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
    Json(payload): Json<RolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let role = app_state
        .organization_service
        .update_role(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID da função")),
    responses(
        (status = 200, description = "Função removida em cascata (cargos e funcionários)", body = CascadeSummary),
        (status = 400, description = "Ainda referenciada"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .organization_service
        .delete_role(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// ---
// DESIGNATIONS
// ---

#[utoipa::path(
    post,
    path = "/api/designations",
    tag = "Organization",
    request_body = DesignationPayload,
    responses(
        (status = 201, description = "Cargo criado", body = Designation),
        (status = 400, description = "Função inexistente ou nome duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_designation(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<DesignationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let designation = app_state
        .organization_service
        .create_designation(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(designation)))
}

#[utoipa::path(
    get,
    path = "/api/designations",
    tag = "Organization",
    responses((status = 200, description = "Cargos", body = Vec<Designation>)),
    security(("api_jwt" = []))
)]
pub async fn list_designations(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let designations = app_state
        .organization_service
        .list_designations()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(designations))
}

#[utoipa::path(
    get,
    path = "/api/designations/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo", body = Designation),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_designation(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let designation = app_state
        .organization_service
        .get_designation(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(designation))
}

#[utoipa::path(
    put,
    path = "/api/designations/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do cargo")),
    request_body = DesignationPayload,
    responses(
        (status = 200, description = "Cargo atualizado", body = Designation),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_designation(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
    Json(payload): Json<DesignationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let designation = app_state
        .organization_service
        .update_designation(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(designation))
}

#[utoipa::path(
    delete,
    path = "/api/designations/{id}",
    tag = "Organization",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo removido em cascata", body = CascadeSummary),
        (status = 400, description = "Ainda referenciado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_designation(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .organization_service
        .delete_designation(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

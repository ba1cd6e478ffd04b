// src/handlers/employees.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{ApiError, AppError},
        time::{default_work_end, default_work_start, parse_time_of_day},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, StaffOnly},
    },
    models::employee::{
        AssignmentChanges, AssignmentFilter, CreatedEmployee, DeletedEmployee, Employee,
        EmployeeAssignment, EmployeeDetails, EmploymentType, NewAssignment, NewEmployee,
        PersonalInfoChanges,
    },
};

const DEFAULT_SALARY: Decimal = Decimal::from_parts(5_000_000, 0, 0, false, 2);

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value must not be negative.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateEmployee
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(required(message = "Name is required."), length(min = 1, message = "Name is required."))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,

    #[validate(
        required(message = "National ID is required."),
        length(min = 1, message = "National ID is required.")
    )]
    #[schema(example = "12345-6789012-3")]
    pub national_id: Option<String>,

    #[validate(required(message = "Start date is required."))]
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "E-mail is required."), email(message = "The e-mail address is invalid."))]
    #[schema(example = "john@x.com")]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    pub password: Option<String>,

    // Alocação: só acontece quando seção E cargo vêm juntos
    pub section_id: Option<i32>,
    pub designation_id: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    #[schema(example = "09:00")]
    pub work_start_time: Option<String>,
    #[schema(example = "17:00")]
    pub work_end_time: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub salary: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub bonus: Option<Decimal>,
}

impl CreateEmployeePayload {
    /// Converte o payload (já validado) na entrada do serviço.
    pub fn into_new_employee(self) -> Result<NewEmployee, AppError> {
        let (Some(name), Some(national_id), Some(start_date), Some(email)) =
            (self.name, self.national_id, self.start_date, self.email)
        else {
            return Err(AppError::InvalidInput("name, nationalId, startDate and email are required".into()));
        };

        let assignment = match (self.section_id, self.designation_id) {
            (Some(section_id), Some(designation_id)) => Some(NewAssignment {
                section_id,
                designation_id,
                employment_type: self.employment_type.unwrap_or_default(),
                work_start_time: parse_time_of_day(
                    self.work_start_time.as_deref(),
                    default_work_start(),
                    "workStartTime",
                ),
                work_end_time: parse_time_of_day(
                    self.work_end_time.as_deref(),
                    default_work_end(),
                    "workEndTime",
                ),
                salary: self.salary.unwrap_or(DEFAULT_SALARY),
                bonus: self.bonus.unwrap_or(Decimal::ZERO),
            }),
            _ => None,
        };

        Ok(NewEmployee {
            name: name.trim().to_string(),
            national_id: national_id.trim().to_string(),
            start_date,
            email: email.trim().to_string(),
            password: self.password,
            assignment,
        })
    }
}

// ---
// Payload: UpdateAssignment (atualização parcial)
// ---
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentPayload {
    pub section_id: Option<i32>,
    pub designation_id: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    pub work_start_time: Option<String>,
    pub work_end_time: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub salary: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub bonus: Option<Decimal>,
}

impl From<UpdateAssignmentPayload> for AssignmentChanges {
    fn from(payload: UpdateAssignmentPayload) -> Self {
        AssignmentChanges {
            section_id: payload.section_id,
            designation_id: payload.designation_id,
            employment_type: payload.employment_type,
            work_start_time: payload
                .work_start_time
                .as_deref()
                .map(|raw| parse_time_of_day(Some(raw), default_work_start(), "workStartTime")),
            work_end_time: payload
                .work_end_time
                .as_deref()
                .map(|raw| parse_time_of_day(Some(raw), default_work_end(), "workEndTime")),
            salary: payload.salary,
            bonus: payload.bonus,
        }
    }
}

// ---
// Payload: UpdatePersonalInfo
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonalInfoPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: Option<String>,
    #[validate(email(message = "The e-mail address is invalid."))]
    pub email: Option<String>,
}

// ---
// Payload: AssignEmployee
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignEmployeePayload {
    #[validate(required(message = "The field 'sectionId' is required."))]
    pub section_id: Option<i32>,
    #[validate(required(message = "The field 'designationId' is required."))]
    pub designation_id: Option<i32>,
    #[validate(required(message = "The field 'roleId' is required."))]
    pub role_id: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    pub work_start_time: Option<String>,
    pub work_end_time: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub salary: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub bonus: Option<Decimal>,
}

impl AssignEmployeePayload {
    /// (role_id, alocação com os padrões aplicados)
    pub fn into_assignment(self) -> Result<(i32, NewAssignment), AppError> {
        let (Some(section_id), Some(designation_id), Some(role_id)) =
            (self.section_id, self.designation_id, self.role_id)
        else {
            return Err(AppError::InvalidInput("sectionId, designationId and roleId are required".into()));
        };

        Ok((
            role_id,
            NewAssignment {
                section_id,
                designation_id,
                employment_type: self.employment_type.unwrap_or_default(),
                work_start_time: parse_time_of_day(
                    self.work_start_time.as_deref(),
                    default_work_start(),
                    "workStartTime",
                ),
                work_end_time: parse_time_of_day(
                    self.work_end_time.as_deref(),
                    default_work_end(),
                    "workEndTime",
                ),
                salary: self.salary.unwrap_or(DEFAULT_SALARY),
                bonus: self.bonus.unwrap_or(Decimal::ZERO),
            },
        ))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodePayload {
    /// `null` (ou vazio) remove o código de barras.
    #[validate(length(min = 1, max = 64, message = "The barcode must have between 1 and 64 characters."))]
    #[schema(example = "EMP001123")]
    pub barcode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub state: Option<AssignmentFilter>,
}

fn validation_error(e: validator::ValidationErrors, locale: &Locale, app_state: &AppState) -> ApiError {
    AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store)
}

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = CreatedEmployee),
        (status = 400, description = "Validação ou duplicidade (nationalId / email)"),
        (status = 403, description = "Requer admin/hr")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| validation_error(e, &locale, &app_state))?;

    let input = payload
        .into_new_employee()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .employee_service
        .add_employee(input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(
        ("state" = Option<AssignmentFilter>, Query, description = "assigned | unassigned")
    ),
    responses(
        (status = 200, description = "Funcionários (admins não aparecem)", body = Vec<Employee>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .employee_service
        .list(query.state)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employees))
}

// GET /api/employees/{id}
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "ID da alocação")),
    responses(
        (status = 200, description = "Funcionário", body = Employee),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .get_by_assignment(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employee))
}

// GET /api/employees/det/{detail_id}
#[utoipa::path(
    get,
    path = "/api/employees/det/{detail_id}",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID do cadastro pessoal")),
    responses(
        (status = 200, description = "Funcionário", body = Employee),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee_by_detail(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(detail_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .get_by_detail(detail_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employee))
}

// PUT /api/employees/{id}/assignment
#[utoipa::path(
    put,
    path = "/api/employees/{id}/assignment",
    tag = "Employees",
    params(("id" = i32, Path, description = "ID da alocação")),
    request_body = UpdateAssignmentPayload,
    responses(
        (status = 200, description = "Alocação atualizada (status volta a Active)", body = EmployeeAssignment),
        (status = 400, description = "Seção/cargo inexistente"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_assignment(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAssignmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| validation_error(e, &locale, &app_state))?;

    let updated = app_state
        .employee_service
        .update_assignment(id, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// PUT /api/employees/det/{detail_id}
#[utoipa::path(
    put,
    path = "/api/employees/det/{detail_id}",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID do cadastro pessoal")),
    request_body = UpdatePersonalInfoPayload,
    responses(
        (status = 200, description = "Dados pessoais atualizados", body = EmployeeDetails),
        (status = 400, description = "E-mail inválido ou duplicado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_personal_info(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(detail_id): Path<i32>,
    Json(payload): Json<UpdatePersonalInfoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| validation_error(e, &locale, &app_state))?;

    let changes = PersonalInfoChanges {
        name: payload.name.map(|n| n.trim().to_string()),
        email: payload.email.map(|e| e.trim().to_string()),
    };

    let updated = app_state
        .employee_service
        .update_personal_info(detail_id, changes)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// POST /api/employees/assign/{detail_id}
#[utoipa::path(
    post,
    path = "/api/employees/assign/{detail_id}",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID do cadastro pessoal")),
    request_body = AssignEmployeePayload,
    responses(
        (status = 200, description = "Funcionário alocado", body = EmployeeAssignment),
        (status = 400, description = "Já alocado, referência inexistente ou cargo de outra função"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(detail_id): Path<i32>,
    Json(payload): Json<AssignEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| validation_error(e, &locale, &app_state))?;

    let (role_id, assignment) = payload
        .into_assignment()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .employee_service
        .assign(detail_id, role_id, assignment)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(created))
}

// DELETE /api/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "ID da alocação")),
    responses(
        (status = 200, description = "Funcionário removido", body = DeletedEmployee),
        (status = 400, description = "Ainda referenciado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .employee_service
        .delete_by_assignment(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(deleted))
}

// DELETE /api/employees/det/{detail_id}
#[utoipa::path(
    delete,
    path = "/api/employees/det/{detail_id}",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID do cadastro pessoal")),
    responses(
        (status = 200, description = "Funcionário removido (alocado ou não)", body = DeletedEmployee),
        (status = 400, description = "Ainda referenciado"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee_by_detail(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(detail_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .employee_service
        .delete_by_detail(detail_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(deleted))
}

// PUT /api/employees/det/{detail_id}/barcode
#[utoipa::path(
    put,
    path = "/api/employees/det/{detail_id}/barcode",
    tag = "Employees",
    params(("detail_id" = i32, Path, description = "ID do cadastro pessoal")),
    request_body = BarcodePayload,
    responses(
        (status = 200, description = "Código de barras definido ou removido", body = EmployeeDetails),
        (status = 400, description = "Código já usado por outro funcionário"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_barcode(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<StaffOnly>,
    Path(detail_id): Path<i32>,
    Json(payload): Json<BarcodePayload>,
) -> Result<impl IntoResponse, ApiError> {
    // Vazio vira NULL: vários funcionários podem ficar sem código
    let barcode = payload
        .barcode
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());
    let payload = BarcodePayload { barcode };
    payload
        .validate()
        .map_err(|e| validation_error(e, &locale, &app_state))?;

    let updated = app_state
        .employee_service
        .set_barcode(detail_id, payload.barcode.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(updated))
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro de domínio. Os handlers convertem para `ApiError`
// (já traduzido) com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("{entity} {id} referenciado não existe")]
    ReferenceNotFound { entity: &'static str, id: i32 },

    #[error("Registro duplicado ({0})")]
    Duplicate(&'static str),

    #[error("Registro ainda referenciado por outra tabela")]
    Dependency,

    #[error("Funcionário já alocado")]
    AlreadyAssigned,

    #[error("Cargo {designation_id} não pertence à função {role_id}")]
    DesignationRoleMismatch { designation_id: i32, role_id: i32 },

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Status de licença inválido: {0}")]
    InvalidLeaveStatus(String),

    #[error("Transição de licença não permitida: {from} -> {to}")]
    LeaveTransitionNotAllowed { from: String, to: String },

    #[error("Licença não pode ser excluída no status {0}")]
    LeaveNotDeletable(String),

    #[error("Funcionário sem código de barras")]
    BarcodeMissing,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Perfil '{0}' necessário")]
    Forbidden(&'static str),

    // Erros de banco que não se encaixam na taxonomia (ver `From<sqlx::Error>`)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// Classifica o erro do banco pelo código SQLSTATE:
// 23505 (unique) -> Duplicate, 23503 (foreign key) -> Dependency.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Duplicate(field_for_constraint(db_err.constraint()));
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Dependency;
            }
        }
        if let sqlx::Error::RowNotFound = e {
            return AppError::NotFound("record");
        }
        AppError::DatabaseError(e)
    }
}

fn field_for_constraint(constraint: Option<&str>) -> &'static str {
    let Some(name) = constraint else {
        return "record";
    };
    if name.contains("national_id") {
        "national_id"
    } else if name.contains("barcode") {
        "barcode"
    } else if name.contains("email") {
        "email"
    } else if name.starts_with("attendance") {
        "attendance"
    } else if name.starts_with("employee_assignments") {
        "assignment"
    } else {
        "record"
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::ReferenceNotFound { .. }
            | AppError::Duplicate(_)
            | AppError::Dependency
            | AppError::AlreadyAssigned
            | AppError::DesignationRoleMismatch { .. }
            | AppError::InvalidDateRange
            | AppError::InvalidLeaveStatus(_)
            | AppError::LeaveTransitionNotAllowed { .. }
            | AppError::LeaveNotDeletable(_)
            | AppError::BarcodeMissing => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro de domínio na resposta HTTP traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let t = |key: &str, args: &[(&str, String)]| store.translate(lang, key, args);
        let entity = |name: &str| t(&format!("entity.{}", name), &[]);

        let status = self.status_code();
        let (error, details) = match &self {
            AppError::ValidationError(errors) => {
                (t("error.validation", &[]), Some(validation_details(errors)))
            }
            AppError::InvalidInput(message) => {
                (t("error.invalid_input", &[("message", message.clone())]), None)
            }
            AppError::NotFound(name) => (t("error.not_found", &[("entity", entity(name))]), None),
            AppError::ReferenceNotFound { entity: name, id } => (
                t(
                    "error.reference_not_found",
                    &[("entity", entity(name)), ("id", id.to_string())],
                ),
                None,
            ),
            AppError::Duplicate(field) => (
                t("error.duplicate", &[("field", t(&format!("field.{}", field), &[]))]),
                Some(json!({ "field": field })),
            ),
            AppError::Dependency => (t("error.dependency", &[]), None),
            AppError::AlreadyAssigned => (t("error.already_assigned", &[]), None),
            AppError::DesignationRoleMismatch { designation_id, role_id } => (
                t(
                    "error.designation_role_mismatch",
                    &[
                        ("designation_id", designation_id.to_string()),
                        ("role_id", role_id.to_string()),
                    ],
                ),
                None,
            ),
            AppError::InvalidDateRange => (t("error.invalid_date_range", &[]), None),
            AppError::InvalidLeaveStatus(status) => {
                (t("error.invalid_leave_status", &[("status", status.clone())]), None)
            }
            AppError::LeaveTransitionNotAllowed { from, to } => (
                t("error.leave_transition", &[("from", from.clone()), ("to", to.clone())]),
                None,
            ),
            AppError::LeaveNotDeletable(status) => {
                (t("error.leave_not_deletable", &[("status", status.clone())]), None)
            }
            AppError::BarcodeMissing => (t("error.barcode_missing", &[]), None),
            AppError::InvalidCredentials => (t("error.invalid_credentials", &[]), None),
            AppError::InvalidToken => (t("error.invalid_token", &[]), None),
            AppError::Forbidden(role) => (t("error.forbidden", &[("role", role.to_string())]), None),

            // Todos os outros erros viram 500. O detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (t("error.internal", &[]), None)
            }
        };

        ApiError { status, error, details }
    }
}

// Retorna todos os detalhes da validação, campo a campo.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

/// Erro pronto para ser enviado ao cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

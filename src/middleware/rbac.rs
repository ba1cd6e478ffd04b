// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::UserRole,
};

/// 1. O Trait que define quais perfis passam pelo guardião
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
    fn allows(role: UserRole) -> bool;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
// O perfil vem das claims do JWT: não há consulta ao banco.
impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !T::allows(user.role) {
            let app_state = AppState::from_ref(state);
            let Ok(locale) = Locale::from_request_parts(parts, state).await;
            tracing::warn!("🚫 {} ({}) barrado: requer {}", user.email, user.role.as_str(), T::name());
            return Err(AppError::Forbidden(T::name()).to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PERFIS (TIPOS)
// ---

/// Admin ou RH: mutações de funcionários, hierarquia, presença e licenças.
pub struct StaffOnly;
impl RoleDef for StaffOnly {
    fn name() -> &'static str { "admin/hr" }
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin | UserRole::Hr)
    }
}

/// Só admin: escrita das políticas.
pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn name() -> &'static str { "admin" }
    fn allows(role: UserRole) -> bool {
        role == UserRole::Admin
    }
}

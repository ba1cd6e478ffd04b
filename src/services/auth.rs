// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_transaction, error::AppError},
    db::UserRepository,
    models::auth::{Claims, User, UserRole},
};

/// Usuário autenticado, relido do banco a cada requisição.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub role: UserRole,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self { user_repo, jwt_secret, pool }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&user)
    }

    pub async fn get_user(&self, user: &AuthUser) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user.id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    /// Valida assinatura e expiração e relê a credencial: papel e e-mail vêm do banco,
    /// e um token de credencial já removida deixa de valer.
    pub async fn validate_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let claims = self.decode_claims(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(AuthUser { id: user.id, email: user.email, role: user.role })
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    /// Cria o admin inicial quando ainda não existe nenhum.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.admin_exists().await? {
            return Ok(());
        }

        let hashed = hash_password(password).await?;
        let mut tx = begin_transaction(&self.pool).await?;
        self.user_repo
            .create_user(&mut *tx, &username_from_email(email), email, &hashed, UserRole::Admin)
            .await?;
        tx.commit().await?;

        tracing::info!("👤 Admin inicial criado: {}", email);
        Ok(())
    }
}

/// bcrypt é caro: roda fora do runtime assíncrono.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

/// Nome de usuário = parte local do e-mail ("john@x.com" -> "john").
pub fn username_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        email.trim().to_string()
    } else {
        local.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::postgres::PgPoolOptions;

    fn service() -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/ems_test")
            .unwrap();
        AuthService::new(UserRepository::new(pool.clone()), "segredo-de-teste".into(), pool)
    }

    fn user(role: UserRole) -> User {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        User {
            id: uuid::Uuid::new_v4(),
            username: "hr".into(),
            email: "hr@x.com".into(),
            password_hash: String::new(),
            role,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn username_is_the_local_part() {
        assert_eq!(username_from_email("john@x.com"), "john");
        assert_eq!(username_from_email("jane.doe@company.org"), "jane.doe");
        assert_eq!(username_from_email("@x.com"), "@x.com");
    }

    #[tokio::test]
    async fn claims_carry_role_and_email() {
        let service = service();
        let hr = user(UserRole::Hr);
        let token = service.create_token(&hr).unwrap();

        let claims = service.decode_claims(&token).unwrap();
        assert_eq!(claims.sub, hr.id);
        assert_eq!(claims.email, "hr@x.com");
        assert_eq!(claims.role, UserRole::Hr);
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let service = service();
        let token = service.create_token(&user(UserRole::Admin)).unwrap();
        let other = AuthService::new(
            UserRepository::new(PgPoolOptions::new().connect_lazy("postgres://localhost/x").unwrap()),
            "outro-segredo".into(),
            PgPoolOptions::new().connect_lazy("postgres://localhost/x").unwrap(),
        );
        assert!(matches!(other.validate_token(&token).await, Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token("abc.def.ghi").await, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashed = hash_password("segredo123").await.unwrap();
        assert!(verify("segredo123", &hashed).unwrap());
        assert!(!verify("errada", &hashed).unwrap());
    }
}

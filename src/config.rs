// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        AttendanceRepository, DashboardRepository, EmployeeRepository, LeaveRepository,
        OrganizationRepository, PolicyRepository, UserRepository,
    },
    services::{
        attendance_service::AttendanceService, auth::AuthService,
        dashboard_service::DashboardService, document_service::DocumentService,
        employee_service::EmployeeService, leave_service::LeaveService,
        organization_service::OrganizationService, payroll_service::PayrollService,
        policy_service::PolicyService,
    },
};

/// Configuração lida do ambiente (`.env` opcional).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub fonts_dir: PathBuf,
    /// Admin inicial: só é criado quando e-mail e senha estão presentes.
    pub admin: Option<(String, String)>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            fonts_dir: optional("FONTS_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./fonts")),
            admin,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    optional(key).ok_or_else(|| anyhow::anyhow!("{} deve ser definida", key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T> {
    match optional(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} inválida: {:?}", key, raw)),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub employee_service: EmployeeService,
    pub organization_service: OrganizationService,
    pub attendance_service: AttendanceService,
    pub leave_service: LeaveService,
    pub policy_service: PolicyService,
    pub payroll_service: PayrollService,
    pub document_service: DocumentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_parts(db_pool, settings.jwt_secret.clone(), settings.fonts_dir.clone())
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn from_parts(db_pool: PgPool, jwt_secret: String, fonts_dir: PathBuf) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        let user_repo = UserRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let org_repo = OrganizationRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());
        let leave_repo = LeaveRepository::new(db_pool.clone());
        let policy_repo = PolicyRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let employee_service = EmployeeService::new(
            employee_repo.clone(),
            org_repo.clone(),
            user_repo,
            attendance_repo.clone(),
            leave_repo.clone(),
            db_pool.clone(),
        );
        let organization_service = OrganizationService::new(
            org_repo,
            employee_repo.clone(),
            employee_service.clone(),
            db_pool.clone(),
        );
        let attendance_service =
            AttendanceService::new(attendance_repo.clone(), employee_repo.clone(), db_pool.clone());
        let leave_service = LeaveService::new(leave_repo.clone(), employee_repo.clone(), db_pool.clone());
        let policy_service = PolicyService::new(policy_repo.clone(), db_pool.clone());
        let payroll_service = PayrollService::new(
            employee_repo.clone(),
            attendance_repo,
            leave_repo,
            policy_repo,
            db_pool.clone(),
        );
        let document_service = DocumentService::new(employee_repo, fonts_dir);
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            i18n_store,
            auth_service,
            employee_service,
            organization_service,
            attendance_service,
            leave_service,
            policy_service,
            payroll_service,
            document_service,
            dashboard_service,
        })
    }
}

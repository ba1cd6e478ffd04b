// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let employee_routes = Router::new()
        .route(
            "/",
            post(handlers::employees::create_employee).get(handlers::employees::list_employees),
        )
        .route(
            "/{id}",
            get(handlers::employees::get_employee).delete(handlers::employees::delete_employee),
        )
        .route("/{id}/assignment", put(handlers::employees::update_assignment))
        .route("/assign/{detail_id}", post(handlers::employees::assign_employee))
        .route(
            "/det/{detail_id}",
            get(handlers::employees::get_employee_by_detail)
                .put(handlers::employees::update_personal_info)
                .delete(handlers::employees::delete_employee_by_detail),
        )
        .route("/det/{detail_id}/barcode", put(handlers::employees::set_barcode))
        .route("/det/{detail_id}/badge", get(handlers::documents::employee_badge));

    let hierarchy_routes = Router::new()
        .route(
            "/departments",
            post(handlers::organization::create_department)
                .get(handlers::organization::list_departments),
        )
        .route(
            "/departments/{id}",
            get(handlers::organization::get_department)
                .put(handlers::organization::update_department)
                .delete(handlers::organization::delete_department),
        )
        .route(
            "/sections",
            post(handlers::organization::create_section).get(handlers::organization::list_sections),
        )
        .route(
            "/sections/{id}",
            get(handlers::organization::get_section)
                .put(handlers::organization::update_section)
                .delete(handlers::organization::delete_section),
        )
        .route(
            "/roles",
            post(handlers::organization::create_role).get(handlers::organization::list_roles),
        )
        .route(
            "/roles/{id}",
            get(handlers::organization::get_role)
                .put(handlers::organization::update_role)
                .delete(handlers::organization::delete_role),
        )
        .route(
            "/designations",
            post(handlers::organization::create_designation)
                .get(handlers::organization::list_designations),
        )
        .route(
            "/designations/{id}",
            get(handlers::organization::get_designation)
                .put(handlers::organization::update_designation)
                .delete(handlers::organization::delete_designation),
        );

    let attendance_routes = Router::new()
        .route(
            "/",
            post(handlers::attendance::upsert_attendance).get(handlers::attendance::list_attendance),
        )
        .route("/barcode", post(handlers::attendance::barcode_check_in))
        .route("/{id}", delete(handlers::attendance::delete_attendance))
        .route("/{id}/check-out", put(handlers::attendance::check_out));

    let leave_routes = Router::new()
        .route(
            "/",
            post(handlers::leaves::apply_leave).get(handlers::leaves::list_leaves),
        )
        .route(
            "/{id}",
            get(handlers::leaves::get_leave).delete(handlers::leaves::delete_leave),
        )
        .route("/{id}/status", put(handlers::leaves::update_leave_status));

    let policy_routes = Router::new()
        .route(
            "/overtime",
            get(handlers::policies::get_overtime_policy)
                .put(handlers::policies::update_overtime_policy),
        )
        .route(
            "/leave",
            get(handlers::policies::get_leave_policy).put(handlers::policies::update_leave_policy),
        )
        .route(
            "/tax",
            get(handlers::policies::get_tax_policy).put(handlers::policies::update_tax_policy),
        );

    // Tudo abaixo exige Bearer token
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/employees", employee_routes)
        .nest("/attendance", attendance_routes)
        .nest("/leaves", leave_routes)
        .nest("/policies", policy_routes)
        .route("/payroll/{employee_id}", get(handlers::payroll::preview_payslip))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .merge(hierarchy_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

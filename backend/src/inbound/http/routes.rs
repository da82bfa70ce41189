//! Route wiring for the two services.
//!
//! Each service mounts its operations under `/api/v1`, serves its OpenAPI
//! document at `/api-docs/openapi.json` (the interface description callers
//! fetch at startup), and exposes the health probes.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::doc::{AdminApiDoc, UserApiDoc};
use crate::domain::DomainError;

use super::{admin, health, users};

/// Malformed JSON bodies become client-classified faults instead of the
/// framework's default error page.
pub(crate) fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        DomainError::invalid_request(format!("invalid request body: {err}")).into()
    })
}

/// Interface description for the user service.
#[get("/api-docs/openapi.json")]
async fn user_api_doc() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(UserApiDoc::openapi())
}

/// Interface description for the admin service.
#[get("/api-docs/openapi.json")]
async fn admin_api_doc() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(AdminApiDoc::openapi())
}

/// Mount the user-service surface.
pub fn user_service(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_error_config())
            .service(users::login)
            .service(users::register)
            .service(users::list_packages)
            .service(users::search_packages)
            .service(users::check_status),
    )
    .service(user_api_doc)
    .service(health::live)
    .service(health::ready);
}

/// Mount the admin-service surface.
pub fn admin_service(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_error_config())
            .service(admin::get_all_users)
            .service(admin::get_all_packages)
            .service(admin::add_package)
            .service(admin::remove_package)
            .service(admin::register_tracking)
            .service(admin::update_status),
    )
    .service(admin_api_doc)
    .service(health::live)
    .service(health::ready);
}

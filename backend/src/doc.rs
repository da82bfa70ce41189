//! OpenAPI documents, one per service.
//!
//! Callers fetch these at startup from `/api-docs/openapi.json` as the
//! machine-readable interface description of the operation surface.

use utoipa::OpenApi;

use crate::inbound::http::{admin, health, users};

/// Interface description for the user service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "packtrack user service",
        description = "Login, registration, and client-facing package queries."
    ),
    paths(
        users::login,
        users::register,
        users::list_packages,
        users::search_packages,
        users::check_status,
        health::live,
        health::ready,
    ),
    components(schemas(
        users::LoginRequest,
        users::RegisterRequest,
        users::ListPackagesRequest,
        users::SearchPackagesRequest,
        users::CheckStatusRequest,
        users::PackageDto,
        users::CheckpointDto,
        crate::domain::user::AuthenticatedUser,
        crate::domain::error::DomainError,
        crate::domain::error::ErrorCode,
        crate::domain::error::FaultClass,
    ))
)]
pub struct UserApiDoc;

/// Interface description for the admin service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "packtrack admin service",
        description = "Package administration and tracking-state transitions."
    ),
    paths(
        admin::get_all_users,
        admin::get_all_packages,
        admin::add_package,
        admin::remove_package,
        admin::register_tracking,
        admin::update_status,
        health::live,
        health::ready,
    ),
    components(schemas(
        admin::AddPackageRequest,
        admin::RemovePackageRequest,
        admin::TrackingUpdateRequest,
        admin::AdminPackageDto,
        crate::domain::user::UserSummary,
        crate::domain::error::DomainError,
        crate::domain::error::ErrorCode,
        crate::domain::error::FaultClass,
    ))
)]
pub struct AdminApiDoc;

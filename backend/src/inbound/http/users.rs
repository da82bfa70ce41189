//! User-service operation handlers.
//!
//! ```text
//! POST /api/v1/login          {"username":"ada","password":"secret"}
//! POST /api/v1/register       {"username":"ada","password":"secret","email":"ada@example.com"}
//! POST /api/v1/listPackages   {"userId":3}
//! POST /api/v1/searchPackages {"userId":3,"searchTerm":"box"}
//! POST /api/v1/checkStatus    {"packageId":9}
//! ```

use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedUser, Checkpoint, CredentialValidationError, DomainError, LoginCredentials,
    Package, Registration,
};

use super::ApiResult;
use super::params::{package_id_param, user_id_param};
use super::state::UserServiceState;

/// Request body for `login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plaintext password; hashed server-side, never stored.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.username, value.password)
    }
}

/// Request body for `register`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired account name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Email address.
    pub email: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.username, value.password, value.email)
    }
}

/// Request body for `listPackages`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPackagesRequest {
    /// The requesting user.
    pub user_id: i32,
}

/// Request body for `searchPackages`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPackagesRequest {
    /// The requesting user.
    pub user_id: i32,
    /// Substring matched against name or description; blank means "all".
    #[serde(default)]
    pub search_term: String,
}

/// Request body for `checkStatus`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatusRequest {
    /// The package whose history is requested.
    pub package_id: i32,
}

/// Client-facing package view.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageDto {
    /// Package identifier.
    pub id: i32,
    /// Short label.
    pub name: String,
    /// Optional free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Origin city.
    pub sender_city: String,
    /// Destination city.
    pub destination_city: String,
    /// Whether tracking has been registered.
    pub is_tracked: bool,
}

impl From<Package> for PackageDto {
    fn from(value: Package) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            description: value.description,
            sender_city: value.sender_city,
            destination_city: value.destination_city,
            is_tracked: value.is_tracked,
        }
    }
}

/// One tracking history entry.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointDto {
    /// Where the package was observed.
    pub city: String,
    /// When the observation was made.
    pub timestamp: DateTime<Utc>,
}

impl From<Checkpoint> for CheckpointDto {
    fn from(value: Checkpoint) -> Self {
        Self {
            city: value.city,
            timestamp: value.recorded_at,
        }
    }
}

fn map_credential_validation_error(err: CredentialValidationError) -> DomainError {
    match err {
        CredentialValidationError::EmptyUsername => {
            DomainError::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username" }))
        }
        CredentialValidationError::EmptyPassword => {
            DomainError::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password" }))
        }
        CredentialValidationError::Shape(inner) => DomainError::invalid_request(inner.to_string()),
    }
}

/// Authenticate a username/password pair.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated identity", body = AuthenticatedUser),
        (status = 400, description = "Missing username or password", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<UserServiceState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthenticatedUser>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(map_credential_validation_error)?;
    let identity = state.auth.login(&credentials).await?;
    Ok(web::Json(identity))
}

/// Create an account with role `client`.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = bool),
        (status = 400, description = "Malformed registration", body = DomainError),
        (status = 409, description = "Username or email already in use", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<UserServiceState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<bool>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_credential_validation_error)?;
    state.auth.register(&registration).await?;
    Ok(web::Json(true))
}

/// Packages where the user is sender or receiver, newest first.
#[utoipa::path(
    post,
    path = "/api/v1/listPackages",
    request_body = ListPackagesRequest,
    responses(
        (status = 200, description = "Membership-filtered packages", body = [PackageDto]),
        (status = 400, description = "Missing or non-positive user id", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["packages"],
    operation_id = "listPackages"
)]
#[post("/listPackages")]
pub async fn list_packages(
    state: web::Data<UserServiceState>,
    payload: web::Json<ListPackagesRequest>,
) -> ApiResult<web::Json<Vec<PackageDto>>> {
    let user = user_id_param(payload.user_id)?;
    let packages = state.directory.list_packages(user).await?;
    Ok(web::Json(packages.into_iter().map(Into::into).collect()))
}

/// Membership-filtered substring search over name and description.
#[utoipa::path(
    post,
    path = "/api/v1/searchPackages",
    request_body = SearchPackagesRequest,
    responses(
        (status = 200, description = "Matching packages", body = [PackageDto]),
        (status = 400, description = "Missing or non-positive user id", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["packages"],
    operation_id = "searchPackages"
)]
#[post("/searchPackages")]
pub async fn search_packages(
    state: web::Data<UserServiceState>,
    payload: web::Json<SearchPackagesRequest>,
) -> ApiResult<web::Json<Vec<PackageDto>>> {
    let request = payload.into_inner();
    let user = user_id_param(request.user_id)?;
    let packages = state
        .directory
        .search_packages(user, &request.search_term)
        .await?;
    Ok(web::Json(packages.into_iter().map(Into::into).collect()))
}

/// A package's tracking history, oldest checkpoint first.
#[utoipa::path(
    post,
    path = "/api/v1/checkStatus",
    request_body = CheckStatusRequest,
    responses(
        (status = 200, description = "Checkpoint history", body = [CheckpointDto]),
        (status = 400, description = "Missing or non-positive package id", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["packages"],
    operation_id = "checkStatus"
)]
#[post("/checkStatus")]
pub async fn check_status(
    state: web::Data<UserServiceState>,
    payload: web::Json<CheckStatusRequest>,
) -> ApiResult<web::Json<Vec<CheckpointDto>>> {
    let package = package_id_param(payload.package_id)?;
    let history = state.directory.check_status(package).await?;
    Ok(web::Json(history.into_iter().map(Into::into).collect()))
}

//! Admin-service operation handlers.
//!
//! ```text
//! POST /api/v1/getAllUsers
//! POST /api/v1/getAllPackages
//! POST /api/v1/addPackage       {"senderId":1,"receiverId":2,"name":"Box A","senderCity":"Lisbon","destinationCity":"Porto"}
//! POST /api/v1/removePackage    {"packageId":41}
//! POST /api/v1/registerTracking {"packageId":41,"city":"Lisbon","timestamp":"2026-08-07T10:00:00Z"}
//! POST /api/v1/updateStatus     {"packageId":41,"city":"Coimbra","timestamp":"2026-08-08T09:00:00Z"}
//! ```
//!
//! Authorisation is the presentation layer's concern; these endpoints
//! trust their caller the same way the original admin endpoint did.

use actix_web::{post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AdminPackage, CheckpointRequest, DomainError, NewPackage, PackageValidationError,
    TrackingValidationError, UserSummary,
};

use super::ApiResult;
use super::params::{package_id_param, user_id_param};
use super::state::AdminServiceState;

/// Request body for `addPackage`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPackageRequest {
    /// Sending user.
    pub sender_id: i32,
    /// Receiving user.
    pub receiver_id: i32,
    /// Short label.
    pub name: String,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Origin city.
    pub sender_city: String,
    /// Destination city.
    pub destination_city: String,
}

/// Request body for `removePackage`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovePackageRequest {
    /// The package to remove.
    pub package_id: i32,
}

/// Request body for `registerTracking` and `updateStatus`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUpdateRequest {
    /// The package the checkpoint belongs to.
    pub package_id: i32,
    /// Where the package was observed.
    pub city: String,
    /// When the observation was made (RFC 3339).
    pub timestamp: DateTime<Utc>,
}

/// Admin-facing package view joined with usernames.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminPackageDto {
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
    /// Username of the sender.
    pub sender_username: String,
    /// Username of the receiver.
    pub receiver_username: String,
    /// When the package record was created.
    pub creation_date: DateTime<Utc>,
}

impl From<AdminPackage> for AdminPackageDto {
    fn from(value: AdminPackage) -> Self {
        Self {
            id: value.package.id.get(),
            name: value.package.name,
            description: value.package.description,
            sender_city: value.package.sender_city,
            destination_city: value.package.destination_city,
            is_tracked: value.package.is_tracked,
            sender_username: value.sender_username,
            receiver_username: value.receiver_username,
            creation_date: value.package.created_at,
        }
    }
}

fn map_package_validation_error(err: PackageValidationError) -> DomainError {
    let field = match &err {
        PackageValidationError::NonPositiveId => "packageId",
        PackageValidationError::EmptyName => "name",
        PackageValidationError::EmptyCity { field } => *field,
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_tracking_validation_error(err: TrackingValidationError) -> DomainError {
    match err {
        TrackingValidationError::EmptyCity => DomainError::invalid_request(err.to_string())
            .with_details(json!({ "field": "city" })),
    }
}

fn checkpoint_request(payload: TrackingUpdateRequest) -> Result<CheckpointRequest, DomainError> {
    let package = package_id_param(payload.package_id)?;
    CheckpointRequest::new(package, payload.city, payload.timestamp)
        .map_err(map_tracking_validation_error)
}

/// All accounts, for sender/receiver selection.
#[utoipa::path(
    post,
    path = "/api/v1/getAllUsers",
    responses(
        (status = 200, description = "All accounts, by username ascending", body = [UserSummary]),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "getAllUsers"
)]
#[post("/getAllUsers")]
pub async fn get_all_users(
    state: web::Data<AdminServiceState>,
) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let users = state.directory.list_all_users().await?;
    Ok(web::Json(users))
}

/// Every package in the system, joined with usernames.
#[utoipa::path(
    post,
    path = "/api/v1/getAllPackages",
    responses(
        (status = 200, description = "All packages, newest first", body = [AdminPackageDto]),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "getAllPackages"
)]
#[post("/getAllPackages")]
pub async fn get_all_packages(
    state: web::Data<AdminServiceState>,
) -> ApiResult<web::Json<Vec<AdminPackageDto>>> {
    let packages = state.directory.list_all_packages().await?;
    Ok(web::Json(packages.into_iter().map(Into::into).collect()))
}

/// Create an untracked package and return its assigned id.
#[utoipa::path(
    post,
    path = "/api/v1/addPackage",
    request_body = AddPackageRequest,
    responses(
        (status = 200, description = "Assigned package id", body = i32),
        (status = 400, description = "Malformed request or unknown sender/receiver", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "addPackage"
)]
#[post("/addPackage")]
pub async fn add_package(
    state: web::Data<AdminServiceState>,
    payload: web::Json<AddPackageRequest>,
) -> ApiResult<web::Json<i32>> {
    let payload = payload.into_inner();
    let sender = user_id_param(payload.sender_id)
        .map_err(|err| err.with_details(json!({ "field": "senderId" })))?;
    let receiver = user_id_param(payload.receiver_id)
        .map_err(|err| err.with_details(json!({ "field": "receiverId" })))?;
    let request = NewPackage::new(
        sender,
        receiver,
        payload.name,
        payload.description,
        payload.sender_city,
        payload.destination_city,
    )
    .map_err(map_package_validation_error)?;

    let id = state.packages.add_package(&request).await?;
    Ok(web::Json(id.get()))
}

/// Remove a package by id.
#[utoipa::path(
    post,
    path = "/api/v1/removePackage",
    request_body = RemovePackageRequest,
    responses(
        (status = 200, description = "Package removed", body = bool),
        (status = 400, description = "Missing or non-positive package id", body = DomainError),
        (status = 404, description = "Package does not exist", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "removePackage"
)]
#[post("/removePackage")]
pub async fn remove_package(
    state: web::Data<AdminServiceState>,
    payload: web::Json<RemovePackageRequest>,
) -> ApiResult<web::Json<bool>> {
    let package = package_id_param(payload.package_id)?;
    state.packages.remove_package(package).await?;
    Ok(web::Json(true))
}

/// Flip an untracked package to tracked and record the first checkpoint.
#[utoipa::path(
    post,
    path = "/api/v1/registerTracking",
    request_body = TrackingUpdateRequest,
    responses(
        (status = 200, description = "Tracking registered", body = bool),
        (status = 400, description = "Malformed request", body = DomainError),
        (status = 404, description = "Package does not exist", body = DomainError),
        (status = 409, description = "Package is already tracked", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "registerTracking"
)]
#[post("/registerTracking")]
pub async fn register_tracking(
    state: web::Data<AdminServiceState>,
    payload: web::Json<TrackingUpdateRequest>,
) -> ApiResult<web::Json<bool>> {
    let request = checkpoint_request(payload.into_inner())?;
    state.tracking.register_tracking(&request).await?;
    Ok(web::Json(true))
}

/// Append a checkpoint to a tracked package.
#[utoipa::path(
    post,
    path = "/api/v1/updateStatus",
    request_body = TrackingUpdateRequest,
    responses(
        (status = 200, description = "Checkpoint appended", body = bool),
        (status = 400, description = "Malformed request", body = DomainError),
        (status = 404, description = "Package does not exist", body = DomainError),
        (status = 409, description = "Package is not tracked", body = DomainError),
        (status = 503, description = "Backing store unavailable", body = DomainError)
    ),
    tags = ["admin"],
    operation_id = "updateStatus"
)]
#[post("/updateStatus")]
pub async fn update_status(
    state: web::Data<AdminServiceState>,
    payload: web::Json<TrackingUpdateRequest>,
) -> ApiResult<web::Json<bool>> {
    let request = checkpoint_request(payload.into_inner())?;
    state.tracking.update_status(&request).await?;
    Ok(web::Json(true))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use actix_web::{App, test as actix_test, web};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{AdminDirectoryQuery, PackageCommand, TrackingCommand};
    use crate::domain::{Package, PackageId, UserId};
    use crate::inbound::http::routes::json_error_config;

    struct StubDirectory;

    #[async_trait]
    impl AdminDirectoryQuery for StubDirectory {
        async fn list_all_users(&self) -> Result<Vec<UserSummary>, DomainError> {
            Ok(vec![
                UserSummary {
                    id: UserId::new(1).expect("id"),
                    username: "ada".to_owned(),
                },
                UserSummary {
                    id: UserId::new(2).expect("id"),
                    username: "grace".to_owned(),
                },
            ])
        }

        async fn list_all_packages(&self) -> Result<Vec<AdminPackage>, DomainError> {
            Ok(vec![AdminPackage {
                package: Package {
                    id: PackageId::new(41).expect("id"),
                    sender_id: UserId::new(1).expect("id"),
                    receiver_id: UserId::new(2).expect("id"),
                    name: "Box A".to_owned(),
                    description: None,
                    sender_city: "Lisbon".to_owned(),
                    destination_city: "Porto".to_owned(),
                    is_tracked: false,
                    created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("time"),
                },
                sender_username: "ada".to_owned(),
                receiver_username: "grace".to_owned(),
            }])
        }
    }

    /// Commands stub with just enough state for the remove-twice and
    /// register-twice scenarios.
    #[derive(Default)]
    struct StubCommands {
        removed: Mutex<HashSet<i32>>,
        tracked: Mutex<HashSet<i32>>,
        known_packages: Vec<i32>,
    }

    impl StubCommands {
        fn with_package(id: i32) -> Self {
            Self {
                known_packages: vec![id],
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PackageCommand for StubCommands {
        async fn add_package(&self, request: &NewPackage) -> Result<PackageId, DomainError> {
            if request.sender_id().get() > 100 {
                return Err(DomainError::invalid_request(
                    "sender or receiver does not exist",
                ));
            }
            PackageId::new(77).map_err(|err| DomainError::internal(err.to_string()))
        }

        async fn remove_package(&self, package: PackageId) -> Result<(), DomainError> {
            let mut removed = self.removed.lock().expect("lock");
            let known = self.known_packages.contains(&package.get());
            if !known || !removed.insert(package.get()) {
                return Err(DomainError::not_found(format!(
                    "package {package} not found"
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TrackingCommand for StubCommands {
        async fn register_tracking(&self, request: &CheckpointRequest) -> Result<(), DomainError> {
            let package = request.package_id().get();
            if !self.known_packages.contains(&package) {
                return Err(DomainError::not_found(format!("package {package} not found")));
            }
            if !self.tracked.lock().expect("lock").insert(package) {
                return Err(DomainError::conflict(format!(
                    "package {package} is already tracked"
                )));
            }
            Ok(())
        }

        async fn update_status(&self, request: &CheckpointRequest) -> Result<(), DomainError> {
            let package = request.package_id().get();
            if !self.known_packages.contains(&package) {
                return Err(DomainError::not_found(format!("package {package} not found")));
            }
            if !self.tracked.lock().expect("lock").contains(&package) {
                return Err(DomainError::conflict(format!(
                    "package {package} is not tracked"
                )));
            }
            Ok(())
        }
    }

    fn test_app(
        commands: Arc<StubCommands>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = AdminServiceState {
            directory: Arc::new(StubDirectory),
            packages: commands.clone(),
            tracking: commands,
        };
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .app_data(json_error_config())
                .service(get_all_users)
                .service(get_all_packages)
                .service(add_package)
                .service(remove_package)
                .service(register_tracking)
                .service(update_status),
        )
    }

    async fn post_json_to<S, B>(app: &S, path: &str, body: Option<Value>) -> (u16, Value)
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
        B::Error: std::fmt::Debug,
    {
        let mut request = actix_test::TestRequest::post().uri(path);
        if let Some(body) = body {
            request = request.set_json(body);
        }
        let response = actix_test::call_service(app, request.to_request()).await;
        let status = response.status().as_u16();
        let bytes = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_web::test]
    async fn get_all_users_lists_accounts() {
        let app = actix_test::init_service(test_app(Arc::new(StubCommands::default()))).await;
        let (status, body) = post_json_to(&app, "/api/v1/getAllUsers", None).await;

        assert_eq!(status, 200);
        let users = body.as_array().expect("array");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], "ada");
    }

    #[actix_web::test]
    async fn get_all_packages_includes_usernames_and_creation_date() {
        let app = actix_test::init_service(test_app(Arc::new(StubCommands::default()))).await;
        let (status, body) = post_json_to(&app, "/api/v1/getAllPackages", None).await;

        assert_eq!(status, 200);
        let first = &body.as_array().expect("array")[0];
        assert_eq!(first["senderUsername"], "ada");
        assert_eq!(first["receiverUsername"], "grace");
        assert!(first.get("creationDate").is_some());
    }

    #[actix_web::test]
    async fn add_package_returns_the_new_id() {
        let app = actix_test::init_service(test_app(Arc::new(StubCommands::default()))).await;
        let (status, body) = post_json_to(
            &app,
            "/api/v1/addPackage",
            Some(serde_json::json!({
                "senderId": 1,
                "receiverId": 2,
                "name": "Box A",
                "senderCity": "Lisbon",
                "destinationCity": "Porto"
            })),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body, Value::from(77));
    }

    #[actix_web::test]
    async fn add_package_surfaces_unknown_users_as_client_faults() {
        let app = actix_test::init_service(test_app(Arc::new(StubCommands::default()))).await;
        let (status, body) = post_json_to(
            &app,
            "/api/v1/addPackage",
            Some(serde_json::json!({
                "senderId": 999,
                "receiverId": 2,
                "name": "Box A",
                "senderCity": "Lisbon",
                "destinationCity": "Porto"
            })),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["fault"], "client");
        assert_eq!(body["message"], "sender or receiver does not exist");
    }

    #[rstest]
    #[case(serde_json::json!({"senderId": 0, "receiverId": 2, "name": "Box", "senderCity": "a", "destinationCity": "b"}), "senderId")]
    #[case(serde_json::json!({"senderId": 1, "receiverId": 2, "name": "", "senderCity": "a", "destinationCity": "b"}), "name")]
    #[case(serde_json::json!({"senderId": 1, "receiverId": 2, "name": "Box", "senderCity": " ", "destinationCity": "b"}), "senderCity")]
    #[actix_web::test]
    async fn add_package_rejects_malformed_requests(#[case] payload: Value, #[case] field: &str) {
        let app = actix_test::init_service(test_app(Arc::new(StubCommands::default()))).await;
        let (status, body) = post_json_to(&app, "/api/v1/addPackage", Some(payload)).await;

        assert_eq!(status, 400);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn remove_package_twice_reports_not_found_on_the_second_call() {
        let app =
            actix_test::init_service(test_app(Arc::new(StubCommands::with_package(41)))).await;

        let (first_status, first_body) = post_json_to(
            &app,
            "/api/v1/removePackage",
            Some(serde_json::json!({"packageId": 41})),
        )
        .await;
        assert_eq!(first_status, 200);
        assert_eq!(first_body, Value::Bool(true));

        let (second_status, second_body) = post_json_to(
            &app,
            "/api/v1/removePackage",
            Some(serde_json::json!({"packageId": 41})),
        )
        .await;
        assert_eq!(second_status, 404);
        assert_eq!(second_body["code"], "not_found");
    }

    #[actix_web::test]
    async fn register_tracking_twice_is_a_conflict() {
        let app =
            actix_test::init_service(test_app(Arc::new(StubCommands::with_package(41)))).await;
        let payload = serde_json::json!({
            "packageId": 41,
            "city": "Lisbon",
            "timestamp": "2026-08-07T10:00:00Z"
        });

        let (first_status, _) =
            post_json_to(&app, "/api/v1/registerTracking", Some(payload.clone())).await;
        assert_eq!(first_status, 200);

        let (second_status, body) =
            post_json_to(&app, "/api/v1/registerTracking", Some(payload)).await;
        assert_eq!(second_status, 409);
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn update_status_on_untracked_package_is_a_conflict() {
        let app =
            actix_test::init_service(test_app(Arc::new(StubCommands::with_package(41)))).await;

        let (status, body) = post_json_to(
            &app,
            "/api/v1/updateStatus",
            Some(serde_json::json!({
                "packageId": 41,
                "city": "Coimbra",
                "timestamp": "2026-08-08T09:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, 409);
        assert_eq!(body["message"], "package 41 is not tracked");
    }

    #[actix_web::test]
    async fn malformed_timestamps_become_invalid_request_faults() {
        let app =
            actix_test::init_service(test_app(Arc::new(StubCommands::with_package(41)))).await;

        let (status, body) = post_json_to(
            &app,
            "/api/v1/registerTracking",
            Some(serde_json::json!({
                "packageId": 41,
                "city": "Lisbon",
                "timestamp": "yesterday-ish"
            })),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["fault"], "client");
    }

    #[actix_web::test]
    async fn blank_city_is_rejected_before_reaching_the_service() {
        let app =
            actix_test::init_service(test_app(Arc::new(StubCommands::with_package(41)))).await;

        let (status, body) = post_json_to(
            &app,
            "/api/v1/updateStatus",
            Some(serde_json::json!({
                "packageId": 41,
                "city": "  ",
                "timestamp": "2026-08-08T09:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["details"]["field"], "city");
    }
}

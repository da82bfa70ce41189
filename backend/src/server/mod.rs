//! Shared bootstrap for the two service binaries.
//!
//! Each binary reads [`config::ServiceSettings`], builds the connection
//! pool and adapters once, and serves its surface until shutdown. The
//! readiness probe flips once the server has bound.

pub mod config;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes;
use crate::inbound::http::state::{AdminServiceState, UserServiceState};
use crate::outbound::persistence::{
    DbPool, DieselPackageRepository, DieselTrackingRepository, DieselUserRepository, PoolConfig,
};
use crate::outbound::security::Argon2CredentialHasher;
use crate::outbound::services::{
    AdminDirectory, PackageAdminService, PackageDirectory, PasswordAuthService,
    TrackingStateService,
};

use self::config::ServiceSettings;

async fn build_pool(settings: &ServiceSettings) -> std::io::Result<DbPool> {
    let pool_config = PoolConfig::new(settings.database.url())
        .with_max_size(settings.database.pool_max_size())
        .with_connection_timeout(settings.database.connect_timeout());
    DbPool::new(pool_config).await.map_err(std::io::Error::other)
}

/// Run the user service until shutdown.
pub async fn run_user_service(settings: ServiceSettings) -> std::io::Result<()> {
    let pool = build_pool(&settings).await?;

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let packages = Arc::new(DieselPackageRepository::new(pool.clone()));
    let tracking = Arc::new(DieselTrackingRepository::new(pool));

    let state = UserServiceState {
        auth: Arc::new(PasswordAuthService::new(
            users,
            Arc::new(Argon2CredentialHasher),
        )),
        directory: Arc::new(PackageDirectory::new(packages, tracking)),
    };

    let health = web::Data::new(HealthState::new());
    let server_health = health.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health.clone())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::user_service)
    })
    .bind(settings.bind_addr)?;

    health.mark_ready();
    info!(addr = %settings.bind_addr, "user service listening");
    server.run().await
}

/// Run the admin service until shutdown.
pub async fn run_admin_service(settings: ServiceSettings) -> std::io::Result<()> {
    let pool = build_pool(&settings).await?;

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let packages = Arc::new(DieselPackageRepository::new(pool.clone()));
    let tracking = Arc::new(DieselTrackingRepository::new(pool));

    let state = AdminServiceState {
        directory: Arc::new(AdminDirectory::new(users, packages.clone())),
        packages: Arc::new(PackageAdminService::new(packages)),
        tracking: Arc::new(TrackingStateService::new(tracking)),
    };

    let health = web::Data::new(HealthState::new());
    let server_health = health.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health.clone())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::admin_service)
    })
    .bind(settings.bind_addr)?;

    health.mark_ready();
    info!(addr = %settings.bind_addr, "admin service listening");
    server.run().await
}

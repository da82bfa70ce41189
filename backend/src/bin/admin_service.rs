//! Admin-service entry point: package administration and tracking-state
//! transitions.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::config::ServiceSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::from_env("0.0.0.0:8082").map_err(std::io::Error::other)?;
    backend::server::run_admin_service(settings).await
}

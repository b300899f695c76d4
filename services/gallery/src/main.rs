use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod discovery;
mod error;
mod models;
mod resolvers;
mod routes;
mod state;

use crate::{
    catalog::CatalogService,
    config::{DriveConfig, GalleryConfig, RemoteBackendKind, S3Config},
    resolvers::{LocalResolver, RemoteResolver, drive::DriveLister, s3::S3Lister},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting gallery service");

    let config = GalleryConfig::from_env()?;
    let timeout = Duration::from_secs(config.remote_timeout_secs);

    let remote = match config.remote_backend {
        Some(RemoteBackendKind::S3) => {
            let s3_config = S3Config::from_env()?;
            let aws_config = aws_config::defaults(BehaviorVersion::latest())
                .timeout_config(
                    TimeoutConfig::builder()
                        .operation_timeout(timeout)
                        .build(),
                )
                .load()
                .await;
            let s3_client = aws_sdk_s3::Client::new(&aws_config);
            info!("Remote media backend: s3://{}", s3_config.bucket_name);
            Some(RemoteResolver::new(
                Arc::new(S3Lister::new(s3_client, s3_config.bucket_name)),
                config.remote_base_url.clone(),
            ))
        }
        Some(RemoteBackendKind::Drive) => {
            // Absent credentials fail here, at startup, not per request
            let drive_config = DriveConfig::from_env()?;
            info!("Remote media backend: drive");
            Some(RemoteResolver::new(
                Arc::new(DriveLister::new(drive_config, timeout)?),
                config.remote_base_url.clone(),
            ))
        }
        None => {
            info!("No remote media backend configured; local media only");
            None
        }
    };

    let local = LocalResolver::new(config.public_base_path.clone());
    let catalog = CatalogService::new(config.events_root.clone(), local, remote);

    let app_state = AppState {
        catalog: Arc::new(catalog),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Gallery service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use sepm_api::app::{build_auth_service, create_app};
use sepm_api::config::load_config;
use sepm_api::middleware::cors::create_cors;
use sepm_api::routes::auth::AppState;
use sepm_core::repositories::{
    InMemoryUserRepository, InMemoryVerificationCodeRepository, UserRepository,
    VerificationCodeRepository,
};
use sepm_core::services::auth::AuthServiceConfig;
use sepm_core::services::verification::{CodeCleanupConfig, CodeCleanupService, CodeNotifier};
use sepm_infra::database::DatabasePool;
use sepm_infra::sms::ConsoleNotifier;
use sepm_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = load_config()?;
    info!(
        "Starting SEPM API Server ({} environment, {:?} storage)",
        config.environment, config.storage
    );

    let notifier = Arc::new(ConsoleNotifier::new());

    match config.storage {
        StorageBackend::MySql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("failed to run database migrations")?;
            info!("Database ready: {}", pool.statistics());

            let users = Arc::new(pool.user_repository());
            let codes = Arc::new(pool.verification_code_repository());
            let result = run_server(config, users, codes, notifier).await;

            pool.close().await;
            result
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; accounts are lost on restart");
            let users = Arc::new(InMemoryUserRepository::new());
            let codes = Arc::new(InMemoryVerificationCodeRepository::new());
            run_server(config, users, codes, notifier).await
        }
    }
}

async fn run_server<U, C, N>(
    config: AppConfig,
    users: Arc<U>,
    codes: Arc<C>,
    notifier: Arc<N>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    C: VerificationCodeRepository + 'static,
    N: CodeNotifier + 'static,
{
    let auth_service = build_auth_service(
        users,
        codes.clone(),
        notifier,
        &config.jwt,
        AuthServiceConfig::default(),
    )
    .context("failed to build authentication service")?;
    let app_state = web::Data::new(AppState::new(Arc::new(auth_service)));

    let cleanup = Arc::new(CodeCleanupService::new(
        codes,
        CodeCleanupConfig {
            interval_seconds: config.code_sweep_interval_seconds,
            ..Default::default()
        },
    ));
    let cleanup_handle = cleanup.start();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let allowed_origins = config.server.allowed_origins.clone();

    HttpServer::new(move || {
        create_app::<U, C, N>(app_state.clone(), create_cors(environment, &allowed_origins))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?
    .run()
    .await?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    info!("Server stopped");

    Ok(())
}

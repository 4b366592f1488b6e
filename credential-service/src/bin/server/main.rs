use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::SecretProvider;
use auth::StaticSecretProvider;
use auth::TokenIssuer;
use auth::TokenVerifier;
use credential_service::config::Config;
use credential_service::config::DatabaseConfig;
use credential_service::config::SecretSource;
use credential_service::config::StorageBackend;
use credential_service::domain::credential::ports::CredentialServicePort;
use credential_service::domain::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::MemoryCredentialRepository;
use credential_service::outbound::repositories::PostgresCredentialRepository;
use credential_service::outbound::secrets::PostgresSecretProvider;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "credential_service=debug,auth=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let issuer = config.jwt.issuer();

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        secrets = ?config.secrets.source,
        issuer = %issuer,
        token_ttl_seconds = config.jwt.ttl_seconds,
        "Configuration loaded"
    );

    if config.jwt.ttl_seconds <= 0 {
        anyhow::bail!("jwt.ttl_seconds must be positive");
    }

    let pg_pool = match (config.storage.backend, config.secrets.source) {
        (StorageBackend::Memory, SecretSource::Static) => None,
        _ => Some(connect_database(&config.database).await?),
    };

    let secrets: Arc<dyn SecretProvider> = match config.secrets.source {
        SecretSource::Static => {
            let key = config
                .secrets
                .static_key
                .clone()
                .filter(|key| !key.is_empty())
                .context("secrets.static_key is required when secrets.source is static")?;
            Arc::new(StaticSecretProvider::new(key.into_bytes()))
        }
        SecretSource::Database => Arc::new(PostgresSecretProvider::new(
            required_pool(&pg_pool)?,
            config.secrets.project_name.clone(),
        )),
    };

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::from_parts(
        password_hasher,
        TokenIssuer::new(Arc::clone(&secrets), issuer)
            .with_ttl(chrono::Duration::seconds(config.jwt.ttl_seconds)),
        TokenVerifier::new(secrets),
    ));

    let credential_service: Arc<dyn CredentialServicePort> = match config.storage.backend {
        StorageBackend::Postgres => Arc::new(CredentialService::new(
            Arc::new(PostgresCredentialRepository::new(required_pool(&pg_pool)?)),
            Arc::clone(&authenticator),
        )),
        StorageBackend::Memory => {
            tracing::warn!(storage = "memory", "Credentials will not survive a restart");
            Arc::new(CredentialService::new(
                Arc::new(MemoryCredentialRepository::new()),
                Arc::clone(&authenticator),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, authenticator);

    axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn connect_database(database: &DatabaseConfig) -> Result<PgPool, anyhow::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    tracing::info!(
        max_connections = database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(pg_pool)
}

fn required_pool(pg_pool: &Option<PgPool>) -> Result<PgPool, anyhow::Error> {
    pg_pool
        .clone()
        .context("database connection required by the configured backends")
}

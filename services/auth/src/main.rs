use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auth::{
    AppState,
    models::NewAdmin,
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{AdminRepository, SessionRepository, SessionSettings},
    routes,
    sweeper::SessionSweeper,
    validation,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication service");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    common::database::run_migrations(&pool).await?;

    info!("Authentication service initialized successfully");

    let admin_repository = AdminRepository::new(pool.clone());
    let session_repository = SessionRepository::new(pool.clone(), SessionSettings::from_env());
    let rate_limiter = RateLimiter::new(RateLimiterConfig::default());

    seed_admin(&admin_repository).await?;

    let sweeper = SessionSweeper::new(session_repository.clone());
    sweeper.start(&SessionSweeper::schedule_from_env()).await?;

    let app_state = AppState {
        admin_repository,
        session_repository,
        rate_limiter,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = std::env::var("AUTH_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Authentication service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the bootstrap admin from `ADMIN_EMAIL`/`ADMIN_PASSWORD`
///
/// Runs only when both variables are set and no admin account exists yet.
async fn seed_admin(admins: &AdminRepository) -> Result<()> {
    let (email, password) = match (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => return Ok(()),
    };

    let email = email.trim().to_lowercase();
    if let Err(e) = validation::validate_email(&email) {
        anyhow::bail!("Invalid ADMIN_EMAIL: {}", e);
    }
    if let Err(e) = validation::validate_password(&password) {
        anyhow::bail!("Invalid ADMIN_PASSWORD: {}", e);
    }

    match admins.create_if_first(&NewAdmin { email, password }).await? {
        Some(admin) => info!("Seeded admin account: {}", admin.email),
        None => warn!("Admin account already exists, seed skipped"),
    }

    Ok(())
}

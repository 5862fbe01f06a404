use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use api::{
    day_key::DayKeySettings,
    repositories::{
        SessionRepository, availability::AvailabilityRepository, booking::BookingRepository,
        content::ContentRepository,
    },
    routes,
    state::AppState,
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

    info!("Starting API service");

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

    info!("API service initialized successfully");

    let app_state = AppState {
        session_repository: SessionRepository::new(pool.clone()),
        booking_repository: BookingRepository::new(pool.clone()),
        availability_repository: AvailabilityRepository::new(pool.clone()),
        content_repository: ContentRepository::new(pool),
        day_keys: DayKeySettings::from_env(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = std::env::var("API_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

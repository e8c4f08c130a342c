use shelter_checkins::{create_pool, router, run_migrations, AppConfig, AppState};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(config.log_level())
        .init();

    info!(
        "Starting server: bind {}, max connections {}",
        config.bind_address(),
        config.database.max_connections
    );

    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    let app = router(AppState::new(pool));

    let addr = config.bind_address();
    info!("Server listening on {}", addr);
    info!("OpenAPI description at http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

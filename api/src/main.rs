use api::{app, state::AppState};
use common::{AppConfig, logger::init_logger};
use migration::{Migrator, MigratorTrait};
use services::AbsencePolicy;
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = match AppConfig::init() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    let _log_guard = init_logger(config);

    // Set up dependencies
    let db = db::connect(&config.database_url())
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let policy = AbsencePolicy::from_config(config);
    tracing::info!(
        budget = policy.budget_minutes,
        warning = policy.warning_minutes,
        danger = policy.danger_minutes,
        "absence policy loaded"
    );

    let app = app(AppState::new(db, policy));

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!(env = %config.env, "listening on {addr}");
    println!("{}", config.banner());

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}

use anyhow::Context;

mod app;
mod config;
mod daily_log;
mod detection;
mod error;
mod foods;
mod profiles;
mod recommendations;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "macrolens=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = match state::AppState::init().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = ?e, "startup failed");
            return Err(e);
        }
    };

    sqlx::migrate!("./migrations")
        .run(&app_state.db)
        .await
        .context("run migrations")?;

    app::serve(app::build_app(app_state)).await
}

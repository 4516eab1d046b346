use buildboard::api::{self, AppState};
use buildboard::{db, seed};
use log::{error, info};
use std::env;
use std::path::PathBuf;

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let db_path = PathBuf::from(env_or("BUILDBOARD_DB", "data/buildboard.db"));
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!("failed to create {}: {err}", parent.display());
            }
        }
    }

    if env_bool("BUILDBOARD_SEED", false) {
        match db::connect(&db_path).and_then(|conn| seed::seed_sample_data(&conn)) {
            Ok(()) => info!("seeded sample data into {}", db_path.display()),
            Err(err) => error!("seeding failed: {err}"),
        }
    }

    let addr = env_or("BUILDBOARD_ADDR", "0.0.0.0:3000");
    let app = api::router(AppState::new(db_path));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind server address");
    info!("listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}

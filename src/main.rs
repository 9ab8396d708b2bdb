#[macro_use]
extern crate rocket;

mod auth;
mod config;
mod db;
mod models;
mod routes;


use log::info;
use rocket::serde::json::Json;
use rocket::{Build, Rocket};
use serde_json::{json, Value};

use config::Config;
use db::DbPool;

#[catch(400)]
fn bad_request() -> Json<Value> {
    Json(json!({ "detail": "Bad request" }))
}

#[catch(401)]
fn unauthorized() -> Json<Value> {
    Json(json!({ "detail": "Unauthorized" }))
}

#[catch(404)]
fn not_found() -> Json<Value> {
    Json(json!({ "detail": "Not found" }))
}

#[catch(422)]
fn unprocessable() -> Json<Value> {
    Json(json!({ "detail": "Malformed request body" }))
}

#[catch(500)]
fn server_error() -> Json<Value> {
    Json(json!({ "detail": "Internal server error" }))
}

/// Assemble the server around an already-initialized pool, so tests can
/// drive the same route tree against an in-memory database.
pub fn build_rocket(pool: DbPool, config: Config) -> Rocket<Build> {
    rocket::build()
        .manage(pool)
        .manage(config)
        .mount("/", routes::system::routes())
        .mount("/auth", routes::auth::routes())
        .mount("/events", routes::events::routes())
        .mount("/content", routes::content::routes())
        .mount("/settings", routes::settings::routes())
        .mount("/announcements", routes::announcements::routes())
        .mount("/telemetry", routes::telemetry::routes())
        .register(
            "/",
            catchers![bad_request, unauthorized, not_found, unprocessable, server_error],
        )
}

#[launch]
fn rocket() -> _ {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Configuration error");

    let pool = db::init_pool(&config.database_path).expect("Failed to initialize database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");
    let steps = db::upgrade_events_table(&pool).expect("Failed to upgrade events table");
    for step in &steps {
        info!("schema: {} -> {}", step.statement, step.outcome);
    }
    db::seed_defaults(&pool).expect("Failed to seed default settings");

    build_rocket(pool, config)
}

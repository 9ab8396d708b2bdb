use chrono::Utc;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::db::{self, DbPool};
use crate::routes::internal;

#[get("/")]
pub fn root() -> Json<Value> {
    Json(json!({ "message": "Festival admin API", "status": "running" }))
}

/// Liveness probe: one round trip to the store decides healthy vs not.
#[get("/health")]
pub fn health(pool: &State<DbPool>) -> Custom<Json<Value>> {
    let probe = pool
        .get()
        .map_err(|e| e.to_string())
        .and_then(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(|e| e.to_string())
        });

    match probe {
        Ok(_) => Custom(
            Status::Ok,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "timestamp": Utc::now().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            log::error!("health check failed: {}", e);
            Custom(
                Status::InternalServerError,
                Json(json!({
                    "status": "unhealthy",
                    "database": "error",
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
        }
    }
}

fn run_migration(pool: &DbPool) -> Result<Json<Value>, Custom<Json<Value>>> {
    let steps = db::upgrade_events_table(pool).map_err(|e| internal("migrate", &e))?;
    Ok(Json(json!({ "message": "Migration complete", "results": steps })))
}

#[get("/migrate")]
pub fn migrate_get(pool: &State<DbPool>) -> Result<Json<Value>, Custom<Json<Value>>> {
    run_migration(pool)
}

#[post("/migrate")]
pub fn migrate_post(pool: &State<DbPool>) -> Result<Json<Value>, Custom<Json<Value>>> {
    run_migration(pool)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![root, health, migrate_get, migrate_post]
}

use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::ApiToken;
use crate::db::DbPool;
use crate::models::telemetry::Telemetry;
use crate::routes::{bad_request, internal, ApiError};

#[derive(Debug, Deserialize)]
pub struct LogForm {
    pub user_id: Option<i64>,
    pub action: Option<String>,
    pub metadata: Option<String>,
}

/// Called by the bot on every interaction; takes no credentials.
#[post("/log", format = "json", data = "<form>")]
pub fn log_interaction(pool: &State<DbPool>, form: Json<LogForm>) -> Result<Json<Value>, ApiError> {
    let (user_id, action) = match (form.user_id, form.action.as_deref()) {
        (Some(uid), Some(action)) if !action.is_empty() => (uid, action),
        _ => return Err(bad_request("user_id and action required")),
    };

    Telemetry::record(pool, user_id, action, form.metadata.as_deref().unwrap_or(""))
        .map_err(|e| internal("record telemetry", &e))?;
    Ok(Json(json!({ "message": "Logged" })))
}

#[get("/stats")]
pub fn stats(_token: ApiToken, pool: &State<DbPool>) -> Result<Json<Value>, ApiError> {
    let stats = Telemetry::stats(pool).map_err(|e| internal("telemetry stats", &e))?;
    serde_json::to_value(stats)
        .map(Json)
        .map_err(|e| internal("serialize stats", &e.to_string()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![log_interaction, stats]
}

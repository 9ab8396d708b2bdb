use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::auth::ApiToken;
use crate::db::DbPool;
use crate::models::setting::{Setting, SettingEntry};
use crate::routes::{bad_request, internal, ApiError};

#[get("/")]
pub fn list_settings(pool: &State<DbPool>) -> Result<Json<Vec<Setting>>, ApiError> {
    Setting::list(pool)
        .map(Json)
        .map_err(|e| internal("list settings", &e))
}

/// Batch upsert. The body must be an array of {key, value, description?};
/// entries are applied independently in order, so a failure partway
/// through leaves the earlier entries in place.
#[post("/", format = "json", data = "<body>")]
pub fn update_settings(
    _token: ApiToken,
    pool: &State<DbPool>,
    body: Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if !body.is_array() {
        return Err(bad_request("Settings must be an array"));
    }

    let entries: Vec<SettingEntry> = serde_json::from_value(body.into_inner())
        .map_err(|_| bad_request("Settings entries must be {key, value} objects"))?;

    Setting::set_many(pool, &entries).map_err(|e| internal("update settings", &e))?;
    Ok(Json(json!({ "message": "Settings updated" })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list_settings, update_settings]
}

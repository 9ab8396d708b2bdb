use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::ApiToken;
use crate::db::DbPool;
use crate::models::announcement::Announcement;
use crate::routes::{bad_request, internal, ApiError};

#[get("/")]
pub fn list_announcements(pool: &State<DbPool>) -> Result<Json<Vec<Announcement>>, ApiError> {
    Announcement::list(pool)
        .map(Json)
        .map_err(|e| internal("list announcements", &e))
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementForm {
    pub title: Option<String>,
    pub message: Option<String>,
    pub priority: Option<String>,
}

/// Persisting the row is the whole contract here; the bot process
/// observing new rows handles the actual fan-out.
#[post("/", format = "json", data = "<form>")]
pub fn create_announcement(
    _token: ApiToken,
    pool: &State<DbPool>,
    form: Json<AnnouncementForm>,
) -> Result<Json<Value>, ApiError> {
    let message = match form.message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => return Err(bad_request("Message is required")),
    };

    let id = Announcement::create(
        pool,
        form.title.as_deref(),
        message,
        form.priority.as_deref(),
    )
    .map_err(|e| internal("create announcement", &e))?;

    Ok(Json(json!({ "message": "Announcement created", "id": id })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: Option<i64>,
}

#[delete("/", format = "json", data = "<form>")]
pub fn delete_announcement(
    _token: ApiToken,
    pool: &State<DbPool>,
    form: Json<DeleteForm>,
) -> Result<Json<Value>, ApiError> {
    let id = form.id.ok_or_else(|| bad_request("ID is required"))?;

    Announcement::delete(pool, id).map_err(|e| internal("delete announcement", &e))?;
    Ok(Json(json!({ "message": "Announcement deleted" })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list_announcements, create_announcement, delete_announcement]
}

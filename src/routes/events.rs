use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::auth::ApiToken;
use crate::db::DbPool;
use crate::models::event::{Event, EventForm, EventPatch, CATEGORIES};
use crate::routes::{internal, not_found, ApiError};

#[get("/?<category>&<active_only>")]
pub fn list_events(
    pool: &State<DbPool>,
    category: Option<String>,
    active_only: Option<bool>,
) -> Result<Json<Vec<Event>>, ApiError> {
    Event::list(pool, category.as_deref(), active_only.unwrap_or(false))
        .map(Json)
        .map_err(|e| internal("list events", &e))
}

/// The category vocabulary is fixed; stored data never changes it.
#[get("/categories")]
pub fn list_categories() -> Json<Value> {
    Json(json!(CATEGORIES))
}

#[get("/<id>")]
pub fn get_event(pool: &State<DbPool>, id: i64) -> Result<Json<Event>, ApiError> {
    Event::find_by_id(pool, id)
        .map(Json)
        .ok_or_else(|| not_found("Event not found"))
}

#[post("/", format = "json", data = "<form>")]
pub fn create_event(
    _token: ApiToken,
    pool: &State<DbPool>,
    form: Json<EventForm>,
) -> Result<Json<Value>, ApiError> {
    let id = Event::create(pool, &form).map_err(|e| internal("create event", &e))?;
    Ok(Json(json!({ "message": "Event created", "id": id })))
}

#[put("/<id>", format = "json", data = "<patch>")]
pub fn update_event(
    _token: ApiToken,
    pool: &State<DbPool>,
    id: i64,
    patch: Json<EventPatch>,
) -> Result<Json<Value>, ApiError> {
    match Event::update(pool, id, &patch) {
        Ok(true) => Ok(Json(json!({ "message": "Event updated", "id": id }))),
        Ok(false) => Err(not_found("Event not found")),
        Err(e) => Err(internal("update event", &e)),
    }
}

#[delete("/<id>")]
pub fn delete_event(
    _token: ApiToken,
    pool: &State<DbPool>,
    id: i64,
) -> Result<Json<Value>, ApiError> {
    match Event::delete(pool, id) {
        Ok(true) => Ok(Json(json!({ "message": "Event deleted", "id": id }))),
        Ok(false) => Err(not_found("Event not found")),
        Err(e) => Err(internal("delete event", &e)),
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        list_events,
        list_categories,
        get_event,
        create_event,
        update_event,
        delete_event,
    ]
}

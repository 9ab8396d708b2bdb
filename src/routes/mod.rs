use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde_json::{json, Value};

pub mod announcements;
pub mod auth;
pub mod content;
pub mod events;
pub mod settings;
pub mod system;
pub mod telemetry;

/// Error half of every handler: a status code plus a `{"detail": ...}` body.
pub type ApiError = Custom<Json<Value>>;

pub fn bad_request(detail: &str) -> ApiError {
    Custom(Status::BadRequest, Json(json!({ "detail": detail })))
}

pub fn unauthorized(detail: &str) -> ApiError {
    Custom(Status::Unauthorized, Json(json!({ "detail": detail })))
}

pub fn not_found(detail: &str) -> ApiError {
    Custom(Status::NotFound, Json(json!({ "detail": detail })))
}

/// Log the real failure with context, hand the caller a generic body.
pub fn internal(context: &str, err: &str) -> ApiError {
    log::error!("{}: {}", context, err);
    Custom(
        Status::InternalServerError,
        Json(json!({ "detail": "Internal server error" })),
    )
}

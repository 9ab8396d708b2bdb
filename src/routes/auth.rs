use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, ApiToken};
use crate::config::Config;
use crate::db::DbPool;
use crate::models::admin::Admin;
use crate::models::bot_user::BotUser;
use crate::routes::{bad_request, internal, unauthorized, ApiError};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[post("/login", format = "json", data = "<form>")]
pub fn login(pool: &State<DbPool>, form: Json<LoginForm>) -> Result<Json<Value>, ApiError> {
    let email = match form.email.as_deref() {
        Some(e) if !e.is_empty() => e,
        _ => return Err(bad_request("Email and password required")),
    };
    let password = match form.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(bad_request("Email and password required")),
    };

    // Unknown email and wrong password fail identically, so callers
    // cannot probe which admin emails exist.
    let admin = Admin::find_by_email(pool, email)
        .ok_or_else(|| unauthorized("Invalid credentials"))?;
    if !auth::verify_password(password, &admin.password_hash) {
        return Err(unauthorized("Invalid credentials"));
    }

    Ok(Json(json!({
        "access_token": auth::issue_token(),
        "token_type": "bearer",
        "user": { "id": admin.id, "email": admin.email, "role": admin.role },
    })))
}

/// Profile behind the shared token. All authenticated admins are
/// indistinguishable, so this is the configured bootstrap identity.
#[get("/me")]
pub fn me(_token: ApiToken, config: &State<Config>) -> Json<Value> {
    Json(json!({
        "id": 1,
        "email": config.admin_email,
        "role": "super_admin",
    }))
}

/// Idempotent bootstrap: creates the configured admin on first call,
/// rotates its password hash on every later one.
#[post("/setup")]
pub fn setup(pool: &State<DbPool>, config: &State<Config>) -> Result<Json<Value>, ApiError> {
    let hash = auth::hash_password(&config.admin_password)
        .map_err(|e| internal("hash admin password", &e))?;

    match Admin::setup(pool, &config.admin_email, &hash) {
        Ok(true) => Ok(Json(json!({
            "message": "Admin created",
            "email": config.admin_email,
        }))),
        Ok(false) => Ok(Json(json!({
            "message": "Admin password updated",
            "email": config.admin_email,
        }))),
        Err(e) => Err(internal("admin setup", &e)),
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterBotUserForm {
    pub telegram_id: Option<i64>,
    pub username: Option<String>,
}

#[post("/register-bot-user", format = "json", data = "<form>")]
pub fn register_bot_user(
    pool: &State<DbPool>,
    form: Json<RegisterBotUserForm>,
) -> Result<Json<Value>, ApiError> {
    let telegram_id = form
        .telegram_id
        .ok_or_else(|| bad_request("Missing telegram_id"))?;

    BotUser::register(pool, telegram_id, form.username.as_deref())
        .map_err(|e| internal("register bot user", &e))?;
    Ok(Json(json!({ "message": "User registered" })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![login, me, setup, register_bot_user]
}

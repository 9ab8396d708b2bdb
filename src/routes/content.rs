use rocket::serde::json::Json;
use rocket::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::ApiToken;
use crate::db::DbPool;
use crate::models::content::ContentPage;
use crate::routes::{bad_request, internal, not_found, ApiError};

/// One page when `key` is given, every page otherwise.
#[get("/?<key>")]
pub fn get_content(pool: &State<DbPool>, key: Option<String>) -> Result<Json<Value>, ApiError> {
    match key {
        Some(k) => {
            let page =
                ContentPage::find_by_key(pool, &k).ok_or_else(|| not_found("Content not found"))?;
            serde_json::to_value(page)
                .map(Json)
                .map_err(|e| internal("serialize content page", &e.to_string()))
        }
        None => {
            let pages = ContentPage::list(pool).map_err(|e| internal("list content", &e))?;
            serde_json::to_value(pages)
                .map(Json)
                .map_err(|e| internal("serialize content pages", &e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentForm {
    pub key: Option<String>,
    pub content: Option<String>,
}

#[post("/", format = "json", data = "<form>")]
pub fn save_content(
    _token: ApiToken,
    pool: &State<DbPool>,
    form: Json<ContentForm>,
) -> Result<Json<Value>, ApiError> {
    let key = match form.key.as_deref() {
        Some(k) if !k.is_empty() => k,
        _ => return Err(bad_request("Key is required")),
    };
    let content = form.content.as_deref().unwrap_or("");

    ContentPage::upsert(pool, key, content).map_err(|e| internal("save content", &e))?;
    Ok(Json(json!({ "message": "Content saved", "key": key })))
}

#[delete("/?<key>")]
pub fn delete_content(
    _token: ApiToken,
    pool: &State<DbPool>,
    key: Option<String>,
) -> Result<Json<Value>, ApiError> {
    let key = match key.as_deref() {
        Some(k) if !k.is_empty() => k,
        _ => return Err(bad_request("Key is required")),
    };

    ContentPage::delete(pool, key).map_err(|e| internal("delete content", &e))?;
    Ok(Json(json!({ "message": "Content deleted", "key": key })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_content, save_content, delete_content]
}

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

/// Fixed pre-shared session token. Every authenticated admin presents
/// this same string, so the system knows exactly one trust level:
/// "authenticated" or not. Issuance and validation are kept behind
/// `issue_token` / `validate_token` so the scheme can change without
/// touching callers.
const SESSION_TOKEN: &str = "festa-admin-session-v1";

pub fn hash_password(password: &str) -> Result<String, String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| e.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

pub fn issue_token() -> String {
    SESSION_TOKEN.to_string()
}

pub fn validate_token(candidate: &str) -> bool {
    candidate == SESSION_TOKEN
}

/// Guard for mutating endpoints: requires `Authorization: Bearer <token>`.
/// A missing or mismatched token fails the request with 401 before the
/// handler runs, so no write is ever attempted.
pub struct ApiToken;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiToken {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = match request.headers().get_one("Authorization") {
            Some(h) => h,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if validate_token(token) {
            Outcome::Success(ApiToken)
        } else {
            Outcome::Error((Status::Unauthorized, ()))
        }
    }
}

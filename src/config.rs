use std::env;

/// Process configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenvy before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    /// The database path has no sane default and is required; the
    /// bootstrap admin credentials fall back to development defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_path = env::var("FESTA_DATABASE_PATH")
            .map_err(|_| "FESTA_DATABASE_PATH environment variable is not set".to_string())?;

        let admin_email =
            env::var("FESTA_ADMIN_EMAIL").unwrap_or_else(|_| "admin@festa.local".to_string());
        let admin_password =
            env::var("FESTA_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        Ok(Config {
            database_path,
            admin_email,
            admin_password,
        })
    }
}

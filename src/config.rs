use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub jwt_secret: String,
}

impl Config {
    /// Reads the configuration from the environment. Values come from `.env`
    /// in development (loaded in `main`) and the process environment in
    /// production.
    pub fn init() -> Config {
        let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        Config { db_url, jwt_secret }
    }
}

use std::env;

/// Runtime configuration, read from the environment once at startup.
///
/// The values are handed to the parts that need them (the token issuer gets
/// the signing secret, the pool initializer gets the database URL). Nothing
/// else in the crate reads environment variables.
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub app_env: String,
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// `APP_ENV=test` switches the database to `TEST_DATABASE_URL` so test
    /// runs never touch the development data.
    ///
    /// # Panics
    /// Panics when a required variable is missing or malformed. This runs
    /// before the server accepts traffic, so failing fast is the right call.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let database_url = if app_env == "test" {
            env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set when APP_ENV=test")
        } else {
            env::var("DATABASE_URL").expect("DATABASE_URL must be set")
        };

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
            database_url,
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()),
            app_env,
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

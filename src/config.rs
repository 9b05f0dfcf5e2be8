pub struct Config {
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        // Missing .env file is fine; variables may come from the environment.
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
        })
    }
}

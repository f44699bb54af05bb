/// Runtime configuration sourced from the process environment.
pub struct Config {
    /// Connection string for the backing store.
    pub database_url: String,
}

impl Config {
    /// Read the configuration from environment variables.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
        })
    }
}

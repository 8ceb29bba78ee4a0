use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub questions_per_page: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Layers defaults, an optional `trivia.*` file and `TRIVIA_*` environment
    /// variables (`__` separates nested keys, e.g. `TRIVIA_DATABASE__URL`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("trivia").required(false))
                .add_source(
                    Environment::with_prefix("TRIVIA")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.questions_per_page", 10)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .build()?
            .try_deserialize()?;
        if settings.application.questions_per_page < 1 {
            return Err(ConfigError::Message(
                "application.questions_per_page must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(settings.application.address(), "0.0.0.0:8080");
        assert_eq!(settings.application.questions_per_page, 10);
        assert_eq!(settings.database.url.expose_secret(), "sqlite:trivia.db");
        assert_eq!(settings.database.max_connections, 5);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let builder = Config::builder()
            .set_override("application.port", 3000)
            .unwrap()
            .set_override("database.url", "sqlite::memory:")
            .unwrap();
        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.application.port, 3000);
        assert_eq!(settings.database.url.expose_secret(), "sqlite::memory:");
    }

    #[test]
    fn rejects_empty_pages() {
        let builder = Config::builder()
            .set_override("application.questions_per_page", 0)
            .unwrap();
        assert!(Settings::from_builder(builder).is_err());
    }
}

//! Configuration for Catalog API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URI", Some("mongodb://localhost:27017")),
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
                ("MONGODB_APP_NAME", None),
                ("PORT", Some("4000")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.server.port, 4000);
                assert_eq!(config.mongodb.url(), "mongodb://localhost:27017");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("catalog_api"));
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_config_requires_mongo_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URI", None::<&str>),
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}

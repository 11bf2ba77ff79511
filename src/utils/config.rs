use std::env;
use std::path::PathBuf;

use crate::utils::formatting::Locale;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub locale: Locale,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    /// Reads the environment; `catalog_override` (the `--catalog` flag) wins
    /// over `CATALOG_PATH`.
    pub fn load(catalog_override: Option<PathBuf>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_path: catalog_override.or_else(|| {
                env::var("CATALOG_PATH")
                    .ok()
                    .filter(|path| !path.trim().is_empty())
                    .map(PathBuf::from)
            }),
            locale: env::var("STORE_LOCALE")
                .unwrap_or("pt-BR".to_string())
                .parse::<Locale>()?,
            log_level: env::var("LOG_LEVEL")
                .unwrap_or("info".to_string()),
            environment: env::var("APP_ENV")
                .unwrap_or("development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Tracing filter directive; `--verbose` forces `debug`.
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.log_level
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(path) = &self.catalog_path {
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                return Err(anyhow::anyhow!(
                    "CATALOG_PATH must point to a .json file, got {}",
                    path.display()
                ));
            }
        }

        if self.is_production() && self.catalog_path.is_none() {
            return Err(anyhow::anyhow!("CATALOG_PATH is not set in production"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            locale: Locale::default(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

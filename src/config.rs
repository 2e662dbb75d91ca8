use anyhow::{Context, Result};
use std::{env, error::Error, path::PathBuf, str::FromStr, time::Duration};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Sample,
    File(PathBuf),
    Remote(String),
}

#[derive(Debug, Clone)]
pub struct IdentityProvider {
    pub verify_url: String,
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub catalog: CatalogLocation,
    pub catalog_refresh: Option<Duration>,
    pub submissions_path: Option<PathBuf>,
    pub identity: Option<IdentityProvider>,
    pub publishable_key: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` uses the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let catalog = match (var("CATALOG_PATH"), var("CATALOG_URL")) {
            (Some(path), _) => CatalogLocation::File(path.into()),
            (None, Some(url)) => CatalogLocation::Remote(url),
            (None, None) => {
                info!("CATALOG_PATH and CATALOG_URL not set, using sample catalog");
                CatalogLocation::Sample
            }
        };

        let catalog_refresh = var("CATALOG_REFRESH_SECS")
            .map(|raw| parse::<u64>("CATALOG_REFRESH_SECS", &raw))
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let identity = match (var("IDENTITY_VERIFY_URL"), var("IDENTITY_SECRET_KEY")) {
            (Some(verify_url), Some(secret_key)) => Some(IdentityProvider {
                verify_url,
                secret_key,
            }),
            _ => {
                info!("Identity provider not configured, all visitors are anonymous");
                None
            }
        };

        Ok(Self {
            port: parse("PORT", &with_default(var("PORT"), "PORT", "3000"))?,
            environment: with_default(var("ENVIRONMENT"), "ENVIRONMENT", "development"),
            catalog,
            catalog_refresh,
            submissions_path: var("SUBMISSIONS_PATH").map(PathBuf::from),
            identity,
            publishable_key: var("IDENTITY_PUBLISHABLE_KEY").unwrap_or_default(),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn with_default(value: Option<String>, key: &str, default: &str) -> String {
    value.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

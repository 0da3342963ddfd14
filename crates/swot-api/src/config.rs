use serde::Deserialize;

/// Deployment environment, read from `ENVIRONMENT`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Minimum length of `COOKIE_SECRET`; the private cookie key needs 64 bytes
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

fn default_max_connections() -> u32 {
    10
}

fn default_port() -> u16 {
    3000
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

/// Server configuration, deserialized from environment variables with `envy`
///
/// Without `DATABASE_URL` the server keeps everything in memory.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub environment: Environment,
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub cookie_secret: String,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    /// Build the config from explicit `(KEY, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(vars)?;

        if config.cookie_secret.len() < MIN_COOKIE_SECRET_LEN {
            return Err(envy::Error::Custom(format!(
                "COOKIE_SECRET must be at least {MIN_COOKIE_SECRET_LEN} characters long"
            )));
        }

        Ok(config)
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }
}

use std::env;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Full connection string; takes precedence over the individual parts.
    pub database_url: Option<String>,
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_NAME` is only required when `DATABASE_URL` is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let database_url = lookup("DATABASE_URL").ok();
        let database_name = match lookup("DATABASE_NAME") {
            Ok(name) => name,
            Err(_) if database_url.is_some() => String::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            database_url,
            database_host: lookup("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
            database_port: lookup("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .unwrap_or(5432),
            database_user: lookup("DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
            database_password: lookup("DATABASE_PASSWORD").unwrap_or_default(),
            database_name,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: lookup("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: lookup("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            public_dir: PathBuf::from(
                lookup("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            ),
        })
    }

    /// Connection options for the session store.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            return url.parse();
        }
        Ok(PgConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .username(&self.database_user)
            .password(&self.database_password)
            .database(&self.database_name))
    }

    /// Directory generated CSV reports are written to; served under `/reports`.
    pub fn report_dir(&self) -> PathBuf {
        self.public_dir.join("reports")
    }
}

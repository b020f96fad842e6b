use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderName;
use petcare_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub identity_header: HeaderName,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|connections| *connections > 0)
                .ok_or_else(|| {
                    AppError::Validation(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer".to_owned(),
                    )
                })?,
            None => 10,
        };

        let frontend_url = lookup("FRONTEND_URL")
            .map(|value| value.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let identity_header = lookup("IDENTITY_HEADER")
            .unwrap_or_else(|| DEFAULT_IDENTITY_HEADER.to_owned());
        let identity_header =
            HeaderName::from_str(identity_header.trim().to_ascii_lowercase().as_str()).map_err(
                |error| AppError::Validation(format!("invalid IDENTITY_HEADER: {error}")),
            )?;

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            identity_header,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use petcare_core::AppError;

    use super::ApiConfig;

    fn config(entries: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = entries
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(false, |name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/petcare")])
            .unwrap_or_else(|error| panic!("config should load: {error}"));

        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.identity_header.as_str(), "x-user-id");
        assert_eq!(
            config.socket_address().ok().map(|address| address.to_string()),
            Some("127.0.0.1:3001".to_owned())
        );
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(config(&[]), Err(AppError::Validation(_))));
        assert!(matches!(
            config(&[("DATABASE_URL", "  ")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn overrides_are_normalized() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/petcare"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("FRONTEND_URL", "https://app.petcare.test/"),
            ("IDENTITY_HEADER", "X-Forwarded-User"),
        ])
        .unwrap_or_else(|error| panic!("config should load: {error}"));

        assert_eq!(config.database_max_connections, 4);
        assert_eq!(config.frontend_url, "https://app.petcare.test");
        assert_eq!(config.identity_header.as_str(), "x-forwarded-user");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config(&[
                ("DATABASE_URL", "postgres://localhost/petcare"),
                ("DATABASE_MAX_CONNECTIONS", "0"),
            ]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            config(&[
                ("DATABASE_URL", "postgres://localhost/petcare"),
                ("IDENTITY_HEADER", "not a header"),
            ]),
            Err(AppError::Validation(_))
        ));
    }
}

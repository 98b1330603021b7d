//! Command-line and environment configuration.

use std::net::{AddrParseError, SocketAddr};

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use clap::Parser;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid listen address {value:?}: {source}")]
    Listen {
        value: String,
        source: AddrParseError,
    },
    #[error("invalid CORS origin {value:?}: {source}")]
    Origin {
        value: String,
        source: InvalidHeaderValue,
    },
    #[error("at least one CORS origin is required")]
    NoOrigins,
}

#[derive(Parser, Debug)]
#[command(
    name = "habit-web",
    about = "Habit Tracker web server",
    version = habit_core::VERSION,
    long_version = habit_core::LONG_VERSION
)]
pub(crate) struct Args {
    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8000", env = "HABIT_LISTEN")]
    pub(crate) listen: String,

    /// Comma-separated list of origins allowed to call the API with credentials.
    #[arg(
        long,
        env = "HABIT_CORS_ORIGINS",
        default_value = "http://localhost:3000",
        value_delimiter = ','
    )]
    pub(crate) cors_origins: Vec<String>,

    /// Document title of the landing page.
    #[arg(long, default_value = "Habit Tracker", env = "HABIT_TITLE")]
    pub(crate) title: String,
}

impl Args {
    pub(crate) fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen.parse().map_err(|source| ConfigError::Listen {
            value: self.listen.clone(),
            source,
        })
    }
}

/// Credentialed CORS for the given origins. Methods and headers are mirrored
/// from the preflight request, since wildcards are not allowed with credentials.
pub(crate) fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).map_err(|source| ConfigError::Origin {
                value: o.to_owned(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if origins.is_empty() {
        return Err(ConfigError::NoOrigins);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_args() {
        let args = Args::try_parse_from([
            "habit-web",
            "--listen",
            "127.0.0.1:9000",
            "--cors-origins",
            "http://localhost:3000,https://habits.example.com",
            "--title",
            "My Habits",
        ])
        .unwrap();
        assert_eq!(args.listen_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(
            args.cors_origins,
            ["http://localhost:3000", "https://habits.example.com"]
        );
        assert_eq!(args.title, "My Habits");
    }

    #[test]
    fn test_invalid_listen() {
        let args = Args::try_parse_from(["habit-web", "--listen", "localhost"]).unwrap();
        let err = args.listen_addr().unwrap_err();
        assert!(matches!(err, ConfigError::Listen { .. }));
    }

    #[test]
    fn test_cors_layer_origins() {
        assert!(cors_layer(&["http://localhost:3000".to_owned()]).is_ok());
        assert!(matches!(
            cors_layer(&["bad\norigin".to_owned()]),
            Err(ConfigError::Origin { .. })
        ));
        assert!(matches!(
            cors_layer(&[" ".to_owned()]),
            Err(ConfigError::NoOrigins)
        ));
    }
}

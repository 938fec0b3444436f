use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{not_configured_error, Error, CONFIGURATION};

#[derive(Clone, Debug, PartialEq)]
pub enum GeocodeProviderKind {
    BrasilApi,
    CepAberto { token: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RouteProviderKind {
    OpenRoute { api_key: String },
    Mapbox { access_token: String },
    GraphHopper { api_key: String },
}

/// Process configuration, read once at startup.
///
/// Provider credentials are checked here so a misconfigured process never
/// starts serving.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub geocode_provider: GeocodeProviderKind,
    pub route_provider: RouteProviderKind,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        if dotenv::dotenv().is_ok() {
            info!("loaded variables from .env");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, Error> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| -> Result<String, Error> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| not_configured_error(key))
        };

        let geocode_provider = match try_load::<_, String>(&lookup, "GEOCODE_PROVIDER", "brasilapi")?
            .to_lowercase()
            .as_str()
        {
            "brasilapi" => GeocodeProviderKind::BrasilApi,
            "cepaberto" => GeocodeProviderKind::CepAberto {
                token: secret("CEPABERTO_TOKEN")?,
            },
            other => return Err(unknown_provider("GEOCODE_PROVIDER", other)),
        };

        let route_provider = match try_load::<_, String>(&lookup, "ROUTE_PROVIDER", "openroute")?
            .to_lowercase()
            .as_str()
        {
            "openroute" => RouteProviderKind::OpenRoute {
                api_key: secret("OPENROUTE_KEY")?,
            },
            "mapbox" => RouteProviderKind::Mapbox {
                access_token: secret("MAPBOX_TOKEN")?,
            },
            "graphhopper" => RouteProviderKind::GraphHopper {
                api_key: secret("GRAPHHOPPER_KEY")?,
            },
            other => return Err(unknown_provider("ROUTE_PROVIDER", other)),
        };

        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "3000")?,
            geocode_provider,
            route_provider,
            http_timeout: Duration::from_secs(try_load(&lookup, "HTTP_TIMEOUT_SECS", "15")?),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            Error {
                code: CONFIGURATION,
                message: format!("invalid {}: {}", key, e),
            }
        })
}

fn unknown_provider(key: &str, value: &str) -> Error {
    Error {
        code: CONFIGURATION,
        message: format!("unknown {}: {}", key, value),
    }
}

#[cfg(test)]
fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn defaults_to_brasilapi_and_openroute() {
    let config = Config::from_map(&vars(&[("OPENROUTE_KEY", "ors-key")])).unwrap();

    assert_eq!(config.port, 3000);
    assert_eq!(config.host.to_string(), "0.0.0.0");
    assert_eq!(config.http_timeout, Duration::from_secs(15));
    assert_eq!(config.geocode_provider, GeocodeProviderKind::BrasilApi);
    assert_eq!(
        config.route_provider,
        RouteProviderKind::OpenRoute {
            api_key: "ors-key".into()
        }
    );
}

#[test]
fn missing_route_credential_fails_at_startup() {
    let err = Config::from_map(&vars(&[])).unwrap_err();
    assert_eq!(err.code, CONFIGURATION);
    assert!(err.message.contains("OPENROUTE_KEY"));

    let err = Config::from_map(&vars(&[("ROUTE_PROVIDER", "mapbox"), ("MAPBOX_TOKEN", "  ")]))
        .unwrap_err();
    assert!(err.message.contains("MAPBOX_TOKEN"));
}

#[test]
fn selects_providers_by_name() {
    let config = Config::from_map(&vars(&[
        ("GEOCODE_PROVIDER", "CepAberto"),
        ("CEPABERTO_TOKEN", "cep-token"),
        ("ROUTE_PROVIDER", "graphhopper"),
        ("GRAPHHOPPER_KEY", "gh-key"),
        ("PORT", "8080"),
        ("HTTP_TIMEOUT_SECS", "5"),
    ]))
    .unwrap();

    assert_eq!(
        config.geocode_provider,
        GeocodeProviderKind::CepAberto {
            token: "cep-token".into()
        }
    );
    assert_eq!(
        config.route_provider,
        RouteProviderKind::GraphHopper {
            api_key: "gh-key".into()
        }
    );
    assert_eq!(config.port, 8080);
    assert_eq!(config.http_timeout, Duration::from_secs(5));
}

#[test]
fn rejects_unknown_provider_and_bad_port() {
    let err = Config::from_map(&vars(&[("ROUTE_PROVIDER", "here"), ("OPENROUTE_KEY", "k")]))
        .unwrap_err();
    assert!(err.message.contains("ROUTE_PROVIDER"));

    let err = Config::from_map(&vars(&[("OPENROUTE_KEY", "k"), ("PORT", "http")])).unwrap_err();
    assert!(err.message.contains("PORT"));
}

//! HTTP server configuration object and environment parsing.

use mockable::{DefaultEnv, Env};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

const MONGO_URI_ENV: &str = "MONGO_URI";
const PORT_ENV: &str = "PORT";
const PORT_EXPECTED: &str = "an integer between 0 and 65535";

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 3000;

/// Settings read from the process environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Document store connection string, when configured.
    pub mongo_uri: Option<String>,
    /// TCP port for the HTTP listener.
    pub port: u16,
}

/// Errors raised while validating server configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

/// Build server settings from environment variables.
///
/// Empty values are treated as unset. A missing `MONGO_URI` is not an error
/// here; the store adapter reports it when connecting.
///
/// # Errors
///
/// Returns [`ServerConfigError::InvalidEnv`] when `PORT` is not a valid port.
pub fn settings_from_env<E: Env>(env: &E) -> Result<ServerSettings, ServerConfigError> {
    let mongo_uri = non_empty(env, MONGO_URI_ENV);
    let port = match non_empty(env, PORT_ENV) {
        None => DEFAULT_PORT,
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ServerConfigError::InvalidEnv {
                name: PORT_ENV,
                value: raw.clone(),
                expected: PORT_EXPECTED,
            })?,
    };

    Ok(ServerSettings { mongo_uri, port })
}

/// Build server settings from the process environment.
///
/// # Errors
///
/// See [`settings_from_env`].
pub fn settings_from_process_env() -> Result<ServerSettings, ServerConfigError> {
    settings_from_env(&DefaultEnv::new())
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Listen on every IPv4 interface at the configured port.
    #[must_use]
    pub const fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            settings.port,
        )))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |name| vars.get(name).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = settings_from_env(&mock_env(&[])).expect("defaults are valid");
        assert_eq!(
            settings,
            ServerSettings {
                mongo_uri: None,
                port: DEFAULT_PORT,
            }
        );
    }

    #[rstest]
    fn reads_uri_and_port() {
        let env = mock_env(&[("MONGO_URI", "mongodb://db:27017/app"), ("PORT", "8080")]);
        let settings = settings_from_env(&env).expect("valid settings");
        assert_eq!(settings.mongo_uri.as_deref(), Some("mongodb://db:27017/app"));
        assert_eq!(settings.port, 8080);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_values_count_as_unset(#[case] value: &str) {
        let env = mock_env(&[("MONGO_URI", value), ("PORT", value)]);
        let settings = settings_from_env(&env).expect("empty values fall back");
        assert_eq!(settings.mongo_uri, None);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[rstest]
    #[case("http")]
    #[case("-1")]
    #[case("65536")]
    #[case("80.5")]
    fn invalid_port_is_rejected(#[case] value: &str) {
        let err = settings_from_env(&mock_env(&[("PORT", value)])).expect_err("invalid port");
        assert_eq!(
            err,
            ServerConfigError::InvalidEnv {
                name: "PORT",
                value: value.to_owned(),
                expected: PORT_EXPECTED,
            }
        );
    }

    #[rstest]
    fn process_environment_is_read_through_default_env() {
        let mirrored = {
            let mut env = MockEnv::new();
            env.expect_string()
                .times(0..)
                .returning(|name| std::env::var(name).ok());
            env
        };
        assert_eq!(settings_from_process_env(), settings_from_env(&mirrored));
    }

    #[rstest]
    fn binds_all_interfaces() {
        let settings = ServerSettings {
            mongo_uri: None,
            port: 3000,
        };
        let config = ServerConfig::from_settings(&settings);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000".parse().expect("addr"));
    }
}

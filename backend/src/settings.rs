//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, environment variables and an optional
//! configuration file. `main` loads a local `.env` first with `dotenvy`,
//! which never overrides variables already present in the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_COLLECTION, DEFAULT_DATABASE, StoreConfig};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_MAX_POOL_SIZE: u32 = 10;
const DEFAULT_MIN_POOL_SIZE: u32 = 0;

/// Missing or malformed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `MONGODB_URI` is absent or blank.
    #[error("MONGODB_URI not set in environment")]
    MissingMongoUri,
    /// `PORT` is absent.
    #[error("PORT not set in environment")]
    MissingPort,
    /// `HOST` is not an IP address.
    #[error("HOST is not a valid IP address: {value}")]
    InvalidHost { value: String },
    /// Pool bounds are inverted.
    #[error("MONGODB_MIN_POOL_SIZE ({min}) exceeds MONGODB_MAX_POOL_SIZE ({max})")]
    InvalidPoolBounds { min: u32, max: u32 },
}

/// Configuration values for the HTTP listener and the document store.
///
/// Environment keys are the upper-cased field names, e.g. `PORT` and
/// `MONGODB_URI`.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
pub struct AppSettings {
    /// Listen port.
    pub port: Option<u16>,
    /// Listen address; defaults to every interface.
    pub host: Option<String>,
    /// Document store connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding the users collection.
    pub mongodb_database: Option<String>,
    /// Users collection name.
    pub mongodb_collection: Option<String>,
    /// Upper bound on pooled store connections.
    pub mongodb_max_pool_size: Option<u32>,
    /// Connections kept open while idle.
    pub mongodb_min_pool_size: Option<u32>,
}

impl AppSettings {
    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    /// [`SettingsError::MissingPort`] without a port, and
    /// [`SettingsError::InvalidHost`] when `host` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let port = self.port.ok_or(SettingsError::MissingPort)?;
        let host = match self.host.as_deref() {
            None => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
        };
        Ok(SocketAddr::new(host, port))
    }

    /// Store client configuration.
    ///
    /// # Errors
    /// [`SettingsError::MissingMongoUri`] when the URI is absent or blank and
    /// [`SettingsError::InvalidPoolBounds`] when min exceeds max.
    pub fn store_config(&self) -> Result<StoreConfig, SettingsError> {
        let uri = self
            .mongodb_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or(SettingsError::MissingMongoUri)?;
        let max = self.mongodb_max_pool_size.unwrap_or(DEFAULT_MAX_POOL_SIZE);
        let min = self.mongodb_min_pool_size.unwrap_or(DEFAULT_MIN_POOL_SIZE);
        if min > max {
            return Err(SettingsError::InvalidPoolBounds { min, max });
        }

        Ok(StoreConfig::new(uri)
            .with_database(
                self.mongodb_database
                    .as_deref()
                    .unwrap_or(DEFAULT_DATABASE),
            )
            .with_collection(
                self.mongodb_collection
                    .as_deref()
                    .unwrap_or(DEFAULT_COLLECTION),
            )
            .with_pool_size(max, min))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 7] = [
        "PORT",
        "HOST",
        "MONGODB_URI",
        "MONGODB_DATABASE",
        "MONGODB_COLLECTION",
        "MONGODB_MAX_POOL_SIZE",
        "MONGODB_MIN_POOL_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("user-directory")])
            .expect("config should load")
    }

    #[rstest]
    fn missing_values_are_reported() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), Err(SettingsError::MissingPort));
        assert_eq!(
            settings.store_config().map(|_| ()),
            Err(SettingsError::MissingMongoUri)
        );
    }

    #[rstest]
    fn environment_values_are_respected() {
        let _guard = lock_env([
            ("PORT", Some("8081".to_owned())),
            ("HOST", Some("127.0.0.1".to_owned())),
            ("MONGODB_URI", Some("mongodb://db:27017".to_owned())),
            ("MONGODB_DATABASE", Some("directory".to_owned())),
            ("MONGODB_COLLECTION", None),
            ("MONGODB_MAX_POOL_SIZE", Some("4".to_owned())),
            ("MONGODB_MIN_POOL_SIZE", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8081)))
        );
        let store = settings.store_config().expect("store config");
        assert_eq!(store.uri(), "mongodb://db:27017");
        assert_eq!(store.database(), "directory");
        assert_eq!(store.collection(), DEFAULT_COLLECTION);
    }

    #[rstest]
    fn default_host_binds_every_interface() {
        let settings = AppSettings {
            port: Some(8080),
            ..AppSettings::default()
        };
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
    }

    #[rstest]
    #[case(Some("   ".to_owned()))]
    #[case(None)]
    fn blank_uri_is_missing(#[case] uri: Option<String>) {
        let settings = AppSettings {
            mongodb_uri: uri,
            ..AppSettings::default()
        };
        assert_eq!(
            settings.store_config().map(|_| ()),
            Err(SettingsError::MissingMongoUri)
        );
    }

    #[rstest]
    fn inverted_pool_bounds_are_rejected() {
        let settings = AppSettings {
            mongodb_uri: Some("mongodb://db".to_owned()),
            mongodb_max_pool_size: Some(2),
            mongodb_min_pool_size: Some(5),
            ..AppSettings::default()
        };
        assert_eq!(
            settings.store_config().map(|_| ()),
            Err(SettingsError::InvalidPoolBounds { min: 5, max: 2 })
        );
    }

    #[rstest]
    fn invalid_host_is_rejected() {
        let settings = AppSettings {
            port: Some(80),
            host: Some("not-an-ip".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}

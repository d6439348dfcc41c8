//! Shared MongoDB client construction and health checking.
//!
//! The driver's `Client` owns a connection pool, so one [`StoreClient`] is
//! built at startup and cloned into every adapter. Each operation checks a
//! connection out of that pool and returns it when the operation completes.
//!
//! # Design
//!
//! - Server selection and socket connect are bounded by
//!   [`StoreConfig::server_selection_timeout`] and [`StoreConfig::connect_timeout`].
//! - [`StoreClient::connect`] issues a `ping` before returning, bounded by its
//!   own timeout, so an unreachable store fails startup rather than the first
//!   request.

use std::future::IntoFuture;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tokio::time::timeout;
use tracing::{debug, info};

use super::documents::UserDocument;

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "felix-cluster";
/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "users";

const APP_NAME: &str = "user-directory";

/// Errors raised while building or verifying the store client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Connection settings are missing or malformed.
    #[error("store configuration error: {message}")]
    Configuration { message: String },

    /// The store could not be reached or failed its health check.
    #[error("store connection error: {message}")]
    Connection { message: String },
}

impl ConnectError {
    /// Create a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Settings for the shared store client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_directory::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("directory")
///     .with_pool_size(20, 2);
/// assert_eq!(config.database(), "directory");
/// assert_eq!(config.operation_timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    server_selection_timeout: Duration,
    connect_timeout: Duration,
    ping_timeout: Duration,
    operation_timeout: Duration,
    max_pool_size: u32,
    min_pool_size: u32,
}

impl StoreConfig {
    /// Create a configuration for `uri` with default names, timeouts and
    /// pool bounds.
    ///
    /// Defaults:
    /// - database `felix-cluster`, collection `users`
    /// - 10 s server selection, connect, and ping timeouts
    /// - 5 s per-operation budget
    /// - pool of at most 10 connections, none kept idle
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
            collection: DEFAULT_COLLECTION.to_owned(),
            server_selection_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            ping_timeout: Duration::from_secs(10),
            operation_timeout: Duration::from_secs(5),
            max_pool_size: 10,
            min_pool_size: 0,
        }
    }

    /// Set the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the pool bounds.
    #[must_use]
    pub fn with_pool_size(mut self, max: u32, min: u32) -> Self {
        self.max_pool_size = max;
        self.min_pool_size = min;
        self
    }

    /// Set the per-operation budget.
    #[must_use]
    pub fn with_operation_timeout(mut self, budget: Duration) -> Self {
        self.operation_timeout = budget;
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Server selection timeout.
    pub fn server_selection_timeout(&self) -> Duration {
        self.server_selection_timeout
    }

    /// Socket connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Per-operation budget.
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    fn client_options_for(&self, mut options: ClientOptions) -> ClientOptions {
        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.connect_timeout = Some(self.connect_timeout);
        options.max_pool_size = Some(self.max_pool_size);
        options.min_pool_size = Some(self.min_pool_size);
        options
    }
}

/// Verified, pooled handle to the document store.
#[derive(Clone, Debug)]
pub struct StoreClient {
    client: Client,
    database: String,
    collection: String,
    ping_timeout: Duration,
    operation_timeout: Duration,
}

impl StoreClient {
    /// Build the client and verify the store answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Configuration`] for a blank or unparsable URI
    /// and [`ConnectError::Connection`] when the store cannot be reached.
    pub async fn connect(config: &StoreConfig) -> Result<Self, ConnectError> {
        if config.uri().trim().is_empty() {
            return Err(ConnectError::configuration("MONGODB_URI not set in environment"));
        }

        let parsed = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| ConnectError::configuration(err.to_string()))?;
        let client = Client::with_options(config.client_options_for(parsed))
            .map_err(|err| ConnectError::connection(err.to_string()))?;

        let store = Self {
            client,
            database: config.database().to_owned(),
            collection: config.collection().to_owned(),
            ping_timeout: config.ping_timeout,
            operation_timeout: config.operation_timeout,
        };
        store.ping().await?;
        info!(
            database = %store.database,
            collection = %store.collection,
            "document store connection verified"
        );
        Ok(store)
    }

    /// Round-trip a `ping` command, bounded by the ping timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Connection`] when the command fails or times
    /// out.
    pub async fn ping(&self) -> Result<(), ConnectError> {
        let admin = self.client.database("admin");
        let command = admin.run_command(doc! { "ping": 1 }).into_future();
        match timeout(self.ping_timeout, command).await {
            Ok(Ok(_)) => {
                debug!("document store ping succeeded");
                Ok(())
            }
            Ok(Err(err)) => Err(ConnectError::connection(err.to_string())),
            Err(_) => Err(ConnectError::connection(format!(
                "ping timed out after {}s",
                self.ping_timeout.as_secs()
            ))),
        }
    }

    /// Resolve the configured database and collection into a typed handle.
    pub(crate) fn users(&self) -> Collection<UserDocument> {
        self.client
            .database(&self.database)
            .collection::<UserDocument>(&self.collection)
    }

    /// Per-operation budget applied by repository adapters.
    pub(crate) fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }
}

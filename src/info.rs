//! Connection parameters.

/// Default host a redis server is reached on.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port that a redis server listens on.
pub const DEFAULT_PORT: u16 = 6379;

/// Where and how to connect.
///
/// Built once by the caller and handed to the client, which never changes it.
///
/// ```
/// use resp_client::ConnectInfo;
///
/// let info = ConnectInfo::new("cache.local", 6380)
///     .with_database(2)
///     .with_password("hunter2");
///
/// assert_eq!(info.port(), 6380);
/// assert_eq!(info.database(), 2);
/// assert_eq!(info.password(), Some("hunter2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectInfo {
    host: String,
    port: u16,
    database: u32,
    password: Option<String>,
}

impl ConnectInfo {
    /// Connect to `host:port`, database `0`, without a password.
    pub fn new(host: impl ToString, port: u16) -> ConnectInfo {
        ConnectInfo {
            host: host.to_string(),
            port,
            database: 0,
            password: None,
        }
    }

    pub fn with_database(mut self, database: u32) -> ConnectInfo {
        self.database = database;
        self
    }

    pub fn with_password(mut self, password: impl ToString) -> ConnectInfo {
        self.password = Some(password.to_string());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> u32 {
        self.database
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl Default for ConnectInfo {
    fn default() -> ConnectInfo {
        ConnectInfo::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

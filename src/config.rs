use crate::error::{BadEnvVarSnafu, BlankEnvVarSnafu, ParseMaxConnectionsSnafu, StudentsResult};
use dotenvy::var;
use secrecy::SecretString;
use snafu::{ResultExt, ensure};
use std::sync::Arc;

pub const PROFILE_VAR: &str = "RESTFUL_API_ENV";
pub const DATABASE_URL_VAR: &str = "RESTFUL_API_DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "RESTFUL_API_DB_MAX_CONNECTIONS";
pub const SERVER_IP_VAR: &str = "RESTFUL_API_SERVER_IP";

const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    profile: String,
    server_ip: String,
    db_config: Arc<DbConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> StudentsResult<Self> {
        Self::from_source(|name| var(name))
    }

    /// Builds the configuration from `get_env_var`, which stands in for the process environment.
    pub fn from_source(
        get_env_var: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> StudentsResult<Self> {
        let profile = get_env_var(PROFILE_VAR).context(BadEnvVarSnafu { name: PROFILE_VAR })?;
        ensure!(
            !profile.trim().is_empty(),
            BlankEnvVarSnafu { name: PROFILE_VAR }
        );

        let server_ip =
            get_env_var(SERVER_IP_VAR).unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        Ok(Self {
            profile: profile.trim().to_string(),
            server_ip,
            db_config: Arc::new(DbConfig::from_source(&get_env_var)?),
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }
}

#[derive(Debug)]
pub struct DbConfig {
    database_url: SecretString,
    max_connections: u32,
}

impl DbConfig {
    fn from_source(
        get_env_var: &impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> StudentsResult<Self> {
        let database_url = get_env_var(DATABASE_URL_VAR).context(BadEnvVarSnafu {
            name: DATABASE_URL_VAR,
        })?;

        let max_connections = match get_env_var(MAX_CONNECTIONS_VAR) {
            Ok(raw) => raw.trim().parse().context(ParseMaxConnectionsSnafu)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            max_connections,
        })
    }

    pub const fn database_url(&self) -> &SecretString {
        &self.database_url
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

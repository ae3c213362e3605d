/// Server configuration
use crate::error::{Result, ServerError};
use blockaction_core::snowflake::MAX_NODE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_id")]
    pub id: IdSettings,

    #[serde(default = "default_cors")]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Shared key for secret derivation and token signing
    #[serde(default)]
    pub secret: String,

    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u32,

    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdSettings {
    #[serde(default = "default_node_id")]
    pub node_id: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|origin| origin == "*")
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `config.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. BLOCKACTION_AUTH__SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("BLOCKACTION")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allow_origins")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret.is_empty() {
            return Err(ServerError::Config(
                "auth secret is required (set BLOCKACTION_AUTH__SECRET)".to_string(),
            ));
        }

        if self.auth.access_token_ttl_secs == 0 {
            return Err(ServerError::Config(
                "access token TTL must be positive".to_string(),
            ));
        }

        if self.id.node_id > MAX_NODE {
            return Err(ServerError::Config(format!(
                "node id {} out of range 0..={}",
                self.id.node_id, MAX_NODE
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/blockaction.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        secret: String::new(),
        access_token_ttl_secs: default_access_token_ttl_secs(),
        issuer: default_issuer(),
    }
}

fn default_access_token_ttl_secs() -> u32 {
    900
}

fn default_issuer() -> String {
    "blockaction".to_string()
}

fn default_id() -> IdSettings {
    IdSettings {
        node_id: default_node_id(),
    }
}

fn default_node_id() -> u16 {
    1
}

fn default_cors() -> CorsSettings {
    CorsSettings {
        allow_origins: default_allow_origins(),
        allow_credentials: default_allow_credentials(),
        max_age_secs: default_max_age_secs(),
    }
}

fn default_allow_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allow_credentials() -> bool {
    true
}

fn default_max_age_secs() -> u64 {
    24 * 60 * 60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            id: default_id(),
            cors: default_cors(),
        }
    }
}

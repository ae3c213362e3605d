/// Shared application state
use crate::{
    config::ServerConfig,
    error::{Result, ServerError},
    services::{AccountService, SecretCodec, TokenService},
};
use blockaction_core::{IdentityStore, SnowflakeGenerator};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<TokenService>,
    pub ids: Arc<SnowflakeGenerator>,
}

impl AppState {
    pub fn new(
        accounts: Arc<AccountService>,
        tokens: Arc<TokenService>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            ids,
        }
    }

    /// Wire the services from configuration
    ///
    /// The same secret keys both the secret codec and the token service.
    pub fn build(config: &ServerConfig, store: Arc<dyn IdentityStore>) -> Result<Self> {
        let ids = SnowflakeGenerator::new(config.id.node_id)
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let ids = Arc::new(ids);

        let tokens = Arc::new(TokenService::new(
            config.auth.secret.as_bytes(),
            config.auth.issuer.clone(),
            config.auth.access_token_ttl_secs,
        ));

        let accounts = AccountService::new(
            store,
            SecretCodec::new(config.auth.secret.as_bytes()),
            Arc::clone(&tokens),
            Arc::clone(&ids),
        );

        Ok(Self::new(Arc::new(accounts), tokens, ids))
    }
}

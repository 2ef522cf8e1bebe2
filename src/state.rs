use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AccountService, EmailService, SeaOrmAccountService};
use crate::tokens::TokenIssuer;

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub tokens: Arc<TokenIssuer>,

    pub email: Arc<EmailService>,

    pub account_service: Arc<dyn AccountService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let tokens = Arc::new(TokenIssuer::new(
            &config.auth.token_secret,
            config.auth.token_ttl_minutes,
        ));

        let email = Arc::new(EmailService::new(&config.email)?);

        let account_service = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            email.clone(),
            tokens.clone(),
            config.security.clone(),
            &config.auth,
        )) as Arc<dyn AccountService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            tokens,
            email,
            account_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}

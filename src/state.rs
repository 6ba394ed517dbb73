use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::jwt::JwtKeys;
use crate::config::AppConfig;
use crate::users::repo::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    /// Locked per store call only; request sequences across calls can still interleave.
    pub store: Arc<RwLock<UserStore>>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let store = if config.seed_demo_users {
            let store = UserStore::with_demo_users();
            tracing::info!(users = store.len(), "seeded demo users");
            store
        } else {
            UserStore::new()
        };
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: AppConfig, store: UserStore) -> Self {
        Self {
            keys: JwtKeys::new(&config.jwt),
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    #[cfg(test)]
    pub fn fake(store: UserStore) -> Self {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                ttl_minutes: 240,
            },
            seed_demo_users: false,
        };
        Self::from_parts(config, store)
    }
}

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
/// Well-known fallback signing secret used when `JWT_SECRET` is unset.
/// Anyone who knows it can mint valid tokens, so it is only fit for local use.
pub const DEFAULT_JWT_SECRET: &str = "secret";
pub const DEFAULT_TTL_MINUTES: i64 = 4 * 60;
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub seed_demo_users: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid PORT {v:?}"))?,
            None => DEFAULT_PORT,
        };

        let secret = match lookup("JWT_SECRET") {
            Some(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET is not set; signing tokens with the insecure default secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };
        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            Some(v) => {
                let minutes = v
                    .parse::<i64>()
                    .with_context(|| format!("invalid JWT_TTL_MINUTES {v:?}"))?;
                if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
                    anyhow::bail!(
                        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
                    );
                }
                minutes
            }
            None => DEFAULT_TTL_MINUTES,
        };
        let jwt = JwtConfig { secret, ttl_minutes };

        let seed_demo_users = lookup("SEED_DEMO_USERS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            jwt,
            seed_demo_users,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

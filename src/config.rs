use std::env;
use std::net::SocketAddr;

use tracing::info;

use crate::error::AppError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// `DATABASE_URL` value that selects the in-process store instead of HTTP.
pub const MEMORY_STORE: &str = "memory:";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL is not set".to_string()))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            info!("BIND_ADDR not set, using default: {}", DEFAULT_BIND_ADDR);
            DEFAULT_BIND_ADDR.to_string()
        });

        Self::new(&database_url, &bind_addr)
    }

    pub fn new(database_url: &str, bind_addr: &str) -> Result<Self, AppError> {
        let database_url = database_url.trim().trim_end_matches('/').to_string();
        if database_url.is_empty() {
            return Err(AppError::Config("DATABASE_URL is empty".to_string()));
        }

        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("Invalid BIND_ADDR {}: {}", bind_addr, e)))?;

        Ok(Self { database_url, bind_addr })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_STORE
    }
}

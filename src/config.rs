//! Startup configuration.
//!
//! Every setting can come from a flag or the environment (after `.env` files
//! are loaded). The signing secret has no default: a missing or blank
//! `JWT_SECRET` stops the process before it binds a socket.

use anyhow::{bail, Result};
use clap::Parser;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;

/// Secrets shorter than this are accepted with a warning.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Parser, Clone)]
#[command(name = "bookmarks")]
#[command(about = "Bookmarks API - account signup, signin and bearer tokens")]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3333")]
    pub bind_addr: SocketAddr,

    /// SQLite database holding accounts (relative paths resolve against the crate directory)
    #[arg(long, env = "AUTH_DB_PATH", default_value = "bookmarks_auth.db")]
    pub auth_db_path: PathBuf,

    /// HMAC secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

impl ServerConfig {
    /// Signing configuration for the credential service
    pub fn auth_config(&self) -> Result<AuthConfig> {
        AuthConfig::new(self.jwt_secret.clone())
    }

    /// Database path with relative paths anchored at the crate directory
    pub fn resolved_db_path(&self) -> PathBuf {
        if self.auth_db_path.is_absolute() {
            return self.auth_db_path.clone();
        }
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&self.auth_db_path)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("auth_db_path", &self.auth_db_path)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

/// Immutable signing configuration, built once at startup
#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must be set to a non-empty value");
        }
        if jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            warn!(
                "⚠️  JWT_SECRET is shorter than {} bytes, use a longer secret in production",
                RECOMMENDED_SECRET_LEN
            );
        }
        Ok(Self { jwt_secret })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

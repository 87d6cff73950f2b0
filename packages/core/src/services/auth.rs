//! Admin gate for editor-only operations
//!
//! The site has a single editor account guarded by one configured password.
//! A successful login yields an [`AdminSession`], which editor-only service
//! calls require as proof of login.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{ConfigError, PortfolioConfig};
use crate::services::error::ServiceError;

/// Proof of a successful admin login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    token: String,
    issued_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Gate for the configured password; fails when none is configured
    pub fn from_config(config: &PortfolioConfig) -> Result<Self, ConfigError> {
        match config.admin_password.as_deref() {
            Some(password) if !password.trim().is_empty() => Ok(Self::new(password)),
            _ => Err(ConfigError::Invalid("admin_password is not configured".to_string())),
        }
    }

    pub fn login(&self, password: &str) -> Result<AdminSession, ServiceError> {
        if !constant_time_eq(self.password.as_bytes(), password.as_bytes()) {
            tracing::warn!("Rejected admin login");
            return Err(ServiceError::Unauthorized);
        }
        tracing::info!("Admin logged in");
        Ok(AdminSession {
            token: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        })
    }
}

/// Byte comparison whose running time depends only on the lengths
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

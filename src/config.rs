//! Configuration module

use std::collections::HashMap;
use std::env;

use sha2::{Digest, Sha256};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the ONNX grade classifier artifact
    pub model_path: String,

    /// Path to the fitted scaler artifact (JSON)
    pub scaler_path: String,

    /// Path to the static intervention list CSV
    pub intervention_list_path: String,

    /// Username -> SHA-256 password digest (hex)
    pub users: HashMap<String, String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8051),

            model_path: env::var("BRIGHTPATH_MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/grade_model.onnx".to_string()),

            scaler_path: env::var("BRIGHTPATH_SCALER_PATH")
                .unwrap_or_else(|_| "artifacts/scaler.json".to_string()),

            intervention_list_path: env::var("BRIGHTPATH_INTERVENTION_LIST")
                .unwrap_or_else(|_| "artifacts/intervention_list.csv".to_string()),

            users: parse_users(
                &env::var("BRIGHTPATH_USERS")
                    .unwrap_or_else(|_| "teacher:bright123,admin:adminpass".to_string()),
            ),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Parse `user:password,user:password` pairs, hashing each password
///
/// Malformed entries are skipped with a warning rather than taken as an
/// empty password.
fn parse_users(raw: &str) -> HashMap<String, String> {
    let mut users = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once(':') {
            Some((user, password)) if !user.is_empty() && !password.is_empty() => {
                users.insert(user.to_string(), hash_password(password));
            }
            _ => {
                tracing::warn!("Ignoring malformed credential entry: {:?}", entry);
            }
        }
    }

    users
}

/// SHA-256 hex digest of a password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

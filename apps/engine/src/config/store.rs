use std::env;

use crate::error::AppError;

/// Store profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum StoreProfile {
    /// Production store profile
    Prod,
    /// Test store profile - enforces safety rules
    Test,
}

/// Builds a store URL from environment variables based on profile
pub fn store_url(profile: StoreProfile) -> Result<String, AppError> {
    let host = host();
    let port = port();
    let db = db_index(profile)?;

    let url = format!("redis://{host}:{port}/{db}");
    Ok(url)
}

/// Get store host from environment (defaults to localhost)
fn host() -> String {
    env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get store port from environment (defaults to 6379)
fn port() -> String {
    env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string())
}

/// Get logical database index based on profile
fn db_index(profile: StoreProfile) -> Result<String, AppError> {
    let db = match profile {
        StoreProfile::Prod => env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string()),
        StoreProfile::Test => {
            let db = must_var("REDIS_TEST_DB")?;
            // Enforce safety: tests must never run against logical database 0
            if db == "0" {
                return Err(AppError::config(
                    "Test profile requires a logical database other than 0".to_string(),
                ));
            }
            db
        }
    };

    if db.parse::<u32>().is_err() {
        return Err(AppError::config(format!(
            "Store database index must be an integer, but got: '{db}'"
        )));
    }
    Ok(db)
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

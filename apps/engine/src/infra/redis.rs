//! Redis-backed session store.
//!
//! A single `ConnectionManager` handle is built at startup and cloned per
//! command. Transient command failures are retried with bounded backoff
//! before surfacing `StoreUnavailable`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ErrorKind, RedisError, RedisResult};
use tokio::time::sleep;
use tracing::warn;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::infra::store::SessionStore;

// Command retry configuration
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 50;
const MAX_RETRY_DELAY_MS: u64 = 200;

pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(store_url: &str) -> Result<Self, AppError> {
        let client = Client::open(store_url)
            .map_err(|err| AppError::config(format!("Invalid store URL: {err}")))?;

        let conn = ConnectionManager::new(client).await.map_err(|err| {
            AppError::internal(format!(
                "Unable to initialize store connection manager: {err}"
            ))
        })?;

        Ok(Self { conn })
    }

    async fn with_retry<T, F, Fut>(&self, op: &'static str, mut call: F) -> Result<T, DomainError>
    where
        F: FnMut(ConnectionManager) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            match call(self.conn.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= MAX_ATTEMPTS || !is_transient_error(&err) {
                        return Err(DomainError::store_unavailable(format!("{op}: {err}")));
                    }

                    let delay_ms = INITIAL_RETRY_DELAY_MS
                        .saturating_mul(2_u64.pow(attempt - 1))
                        .min(MAX_RETRY_DELAY_MS);
                    warn!(
                        op,
                        error = %err,
                        attempt,
                        retry_delay_ms = delay_ms,
                        "Store command failed, retrying"
                    );
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

fn is_transient_error(err: &RedisError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError
            | ErrorKind::BusyLoadingError
            | ErrorKind::TryAgain
            | ErrorKind::ClusterDown
            | ErrorKind::MasterDown
    )
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, DomainError> {
        self.with_retry("HGET", |mut conn| {
            let key = key.to_owned();
            let field = field.to_owned();
            async move { conn.hget::<_, _, Option<String>>(key, field).await }
        })
        .await
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError> {
        self.with_retry("HSET", |mut conn| {
            let key = key.to_owned();
            let field = field.to_owned();
            let value = value.to_owned();
            async move { conn.hset::<_, _, _, ()>(key, field, value).await }
        })
        .await
    }

    async fn set_field_if_absent(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, DomainError> {
        self.with_retry("HSETNX", |mut conn| {
            let key = key.to_owned();
            let field = field.to_owned();
            let value = value.to_owned();
            async move { conn.hset_nx::<_, _, _, bool>(key, field, value).await }
        })
        .await
    }

    async fn append_to_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.with_retry("RPUSH", |mut conn| {
            let key = key.to_owned();
            let value = value.to_owned();
            async move { conn.rpush::<_, _, ()>(key, value).await }
        })
        .await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.with_retry("EXISTS", |mut conn| {
            let key = key.to_owned();
            async move { conn.exists::<_, bool>(key).await }
        })
        .await
    }
}

//! Redis hash backend with a lazily established connection.
//!
//! # Invariants
//! - Constructing the backend only parses the endpoint; it never connects.
//! - The first `set_fields`/`get_all_fields` call connects exactly once.
//! - The connection is never rebuilt; a failed connect is retried on the
//!   next call because nothing was stored.

use super::kv_backend::{KvBackend, StoreError, StoreResult};
use crate::model::record::RecordFields;
use log::{error, info};
use once_cell::sync::OnceCell;
use redis::{Client, Commands, Connection};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Redis-backed hash store sharing one connection across operations.
pub struct RedisBackend {
    client: Client,
    connection: OnceCell<Mutex<Connection>>,
}

impl RedisBackend {
    /// Prepares a backend for `url` (e.g. `redis://127.0.0.1:6379/`).
    ///
    /// # Errors
    /// - Returns `StoreError::Redis` when the URL cannot be parsed.
    pub fn new(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    /// Whether the shared connection has been established.
    pub fn is_connected(&self) -> bool {
        self.connection.get().is_some()
    }

    fn connection(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        let cell = self.connection.get_or_try_init(|| {
            let started_at = Instant::now();
            info!("event=store_connect module=repo status=start backend=redis");
            match self.client.get_connection() {
                Ok(conn) => {
                    info!(
                        "event=store_connect module=repo status=ok backend=redis duration_ms={}",
                        started_at.elapsed().as_millis()
                    );
                    Ok(Mutex::new(conn))
                }
                Err(err) => {
                    error!(
                        "event=store_connect module=repo status=error backend=redis duration_ms={} error={}",
                        started_at.elapsed().as_millis(),
                        err
                    );
                    Err(StoreError::Redis(err))
                }
            }
        })?;

        cell.lock().map_err(|_| StoreError::ConnectionPoisoned)
    }
}

impl KvBackend for RedisBackend {
    fn set_fields(&self, key: &str, fields: &RecordFields) -> StoreResult<()> {
        let items: Vec<(&str, &str)> = fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let mut conn = self.connection()?;
        let _: () = conn.hset_multiple(key, items.as_slice())?;
        Ok(())
    }

    fn get_all_fields(&self, key: &str) -> StoreResult<RecordFields> {
        let mut conn = self.connection()?;
        let fields: HashMap<String, String> = conn.hgetall(key)?;
        Ok(fields.into_iter().collect())
    }
}

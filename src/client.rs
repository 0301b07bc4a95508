use redis::aio::Connection;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisError};
use std::collections::BTreeMap;

use crate::config::DumpConfig;
use crate::error::{DumpError, Result};
use crate::types::KeyType;

/// Thin async wrapper over the store connection. One instance, one
/// connection; every read goes through it sequentially.
pub struct StoreClient {
    conn: Connection,
}

impl StoreClient {
    /// Open an authenticated session to the store described by `cfg`.
    /// A rejected credential or unreachable host surfaces here.
    pub async fn connect(cfg: &DumpConfig) -> Result<Self> {
        let addr = if cfg.tls {
            ConnectionAddr::TcpTls {
                host: cfg.host.clone(),
                port: cfg.port,
                insecure: false,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(cfg.host.clone(), cfg.port)
        };

        let info = ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                db: cfg.db,
                username: None,
                password: cfg.password.clone(),
            },
        };

        let client = Client::open(info).map_err(Self::connection_error)?;
        let conn = client
            .get_async_connection()
            .await
            .map_err(Self::connection_error)?;

        Ok(StoreClient { conn })
    }

    fn connection_error(e: RedisError) -> DumpError {
        DumpError::Connection(e.to_string())
    }

    /// PING - round-trip check that the session is usable
    pub async fn ping(&mut self) -> Result<()> {
        redis::cmd("PING")
            .query_async::<_, ()>(&mut self.conn)
            .await
            .map_err(Self::connection_error)
    }

    /// SCAN cursor [MATCH pattern] [COUNT count] - one page of key names.
    /// Returns the next cursor (0 when iteration is complete) and the page.
    pub async fn scan(
        &mut self,
        cursor: u64,
        pattern: Option<&str>,
        count: usize,
    ) -> Result<(u64, Vec<String>)> {
        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor);
        if let Some(p) = pattern {
            cmd.arg("MATCH").arg(p);
        }
        cmd.arg("COUNT").arg(count);

        cmd.query_async(&mut self.conn)
            .await
            .map_err(Self::connection_error)
    }

    /// TYPE key - the store's declared type, parsed into the closed enum
    pub async fn key_type(&mut self, key: &str) -> Result<KeyType> {
        let reply: String = redis::cmd("TYPE")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| DumpError::TypeQuery(format!("{}: {}", key, e)))?;

        Ok(KeyType::from_store(&reply))
    }

    /// TTL key - remaining seconds (-1 = no expiry, -2 = key absent)
    pub async fn ttl(&mut self, key: &str) -> Result<i64> {
        redis::cmd("TTL")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| DumpError::TypeQuery(format!("{}: {}", key, e)))
    }

    /// GET key - full string value
    pub async fn get_string(&mut self, key: &str) -> Result<String> {
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::fetch_error(key, e))
    }

    /// HGETALL key - every field, sorted for deterministic output
    pub async fn hash_fields(&mut self, key: &str) -> Result<BTreeMap<String, String>> {
        redis::cmd("HGETALL")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::fetch_error(key, e))
    }

    /// LRANGE key 0 -1 - the whole list, in list order
    pub async fn list_elements(&mut self, key: &str) -> Result<Vec<String>> {
        redis::cmd("LRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::fetch_error(key, e))
    }

    /// SMEMBERS key - every member, no order guarantee
    pub async fn set_members(&mut self, key: &str) -> Result<Vec<String>> {
        redis::cmd("SMEMBERS")
            .arg(key)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::fetch_error(key, e))
    }

    /// ZRANGE key 0 -1 WITHSCORES - every member ascending by score,
    /// re-shaped from the wire's (member, score) into (score, member)
    pub async fn sorted_members(&mut self, key: &str) -> Result<Vec<(f64, String)>> {
        let members: Vec<(String, f64)> = redis::cmd("ZRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .arg("WITHSCORES")
            .query_async(&mut self.conn)
            .await
            .map_err(|e| Self::fetch_error(key, e))?;

        Ok(members
            .into_iter()
            .map(|(member, score)| (score, member))
            .collect())
    }

    fn fetch_error(key: &str, e: RedisError) -> DumpError {
        DumpError::ValueFetch(format!("{}: {}", key, e))
    }
}

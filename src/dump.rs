//! Export pipeline: scan every key, read type/ttl/value, assemble the
//! snapshot, write it as one indented JSON document.

use std::path::Path;

use tracing::{debug, info};

use crate::client::StoreClient;
use crate::config::DumpConfig;
use crate::error::Result;
use crate::types::{KeyType, Record, Snapshot, Value};

pub struct Dumper {
    client: StoreClient,
    pattern: Option<String>,
    scan_count: usize,
}

impl Dumper {
    /// Connect to the store described by `cfg`
    pub async fn connect(cfg: &DumpConfig) -> Result<Self> {
        info!("connecting to {} (db {})", cfg.addr(), cfg.db);
        let mut client = StoreClient::connect(cfg).await?;
        client.ping().await?;

        Ok(Dumper {
            client,
            pattern: cfg.pattern.clone(),
            scan_count: cfg.scan_count,
        })
    }

    /// Walk every key with a cursor-based scan and materialize the full
    /// snapshot in memory. Keys are processed one at a time; any read
    /// failure aborts the whole run.
    pub async fn snapshot(&mut self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();
        let mut cursor = 0u64;

        loop {
            let (next, keys) = self
                .client
                .scan(cursor, self.pattern.as_deref(), self.scan_count)
                .await?;
            debug!("scan page: {} keys, next cursor {}", keys.len(), next);

            for key in keys {
                let record = self.read_record(&key).await?;
                // SCAN may hand back a key more than once; the map dedups
                snapshot.insert(key, record);
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        info!("collected {} keys", snapshot.len());
        Ok(snapshot)
    }

    /// Read one key's record: declared type, remaining TTL, then the value
    /// via the reader for that type. Unsupported types get the sentinel and
    /// no value read is attempted.
    pub async fn read_record(&mut self, key: &str) -> Result<Record> {
        let kind = self.client.key_type(key).await?;
        let ttl = self.client.ttl(key).await?;

        let value = match kind {
            KeyType::String => Value::Str(self.client.get_string(key).await?),
            KeyType::Hash => Value::Map(self.client.hash_fields(key).await?),
            KeyType::List => Value::Seq(self.client.list_elements(key).await?),
            KeyType::Set => Value::Seq(self.client.set_members(key).await?),
            KeyType::ZSet => Value::Scored(self.client.sorted_members(key).await?),
            KeyType::Unsupported => return Ok(Record::unsupported(ttl)),
        };

        Ok(Record { kind, ttl, value })
    }
}

/// Serialize the snapshot as indented JSON and overwrite `path`. The file
/// handle is scoped to this call and closed on every exit path.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    info!("wrote {} keys to {}", snapshot.len(), path.display());
    Ok(())
}

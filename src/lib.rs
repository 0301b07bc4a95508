//! Redump - snapshot a Redis-compatible store into a single JSON document
//!
//! # Example
//!
//! ```no_run
//! use redump::{DumpConfig, Dumper};
//!
//! # async fn run() -> redump::Result<()> {
//! let cfg = DumpConfig::new("127.0.0.1", 6379);
//!
//! let mut dumper = Dumper::connect(&cfg).await?;
//! let snapshot = dumper.snapshot().await?;
//! redump::write_snapshot(&snapshot, std::path::Path::new("redis.json"))?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dump;
pub mod error;
pub mod types;

pub use client::StoreClient;
pub use config::DumpConfig;
pub use dump::{write_snapshot, Dumper};
pub use error::{DumpError, Result};
pub use types::{KeyType, Record, Snapshot, Value, UNSUPPORTED_SENTINEL};

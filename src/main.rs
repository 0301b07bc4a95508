//! redump CLI

use clap::{Parser, Subcommand};
use std::path::Path;

use redump::{write_snapshot, DumpConfig, Dumper};

#[derive(Parser)]
#[command(name = "redump")]
#[command(about = "Snapshot a Redis-compatible store into a single JSON document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every key to a JSON file
    Dump {
        /// Store hostname
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Store port
        #[arg(long, default_value = "6379")]
        port: u16,

        /// Auth credential
        #[arg(long, env = "REDUMP_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Use an encrypted (TLS) transport
        #[arg(long)]
        tls: bool,

        /// Logical database index
        #[arg(long, default_value = "0")]
        db: i64,

        /// Only export keys matching this glob pattern
        #[arg(long)]
        pattern: Option<String>,

        /// COUNT hint for each scan page
        #[arg(long, default_value = "100")]
        scan_count: usize,

        /// Output file path (overwritten each run)
        #[arg(short, long, default_value = "redis.json")]
        output: String,
    },

    /// Read a single key and print its record
    Get {
        /// Key to read
        key: String,

        /// Store hostname
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Store port
        #[arg(long, default_value = "6379")]
        port: u16,

        /// Auth credential
        #[arg(long, env = "REDUMP_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Use an encrypted (TLS) transport
        #[arg(long)]
        tls: bool,

        /// Logical database index
        #[arg(long, default_value = "0")]
        db: i64,
    },

    /// Check that the store is reachable and the credential is accepted
    Ping {
        /// Store hostname
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Store port
        #[arg(long, default_value = "6379")]
        port: u16,

        /// Auth credential
        #[arg(long, env = "REDUMP_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Use an encrypted (TLS) transport
        #[arg(long)]
        tls: bool,

        /// Logical database index
        #[arg(long, default_value = "0")]
        db: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            host,
            port,
            password,
            tls,
            db,
            pattern,
            scan_count,
            output,
        } => {
            let cfg = DumpConfig {
                host,
                port,
                password,
                tls,
                db,
                pattern,
                scan_count,
            };

            let mut dumper = Dumper::connect(&cfg).await?;
            let snapshot = dumper.snapshot().await?;
            write_snapshot(&snapshot, Path::new(&output))?;
        }

        Commands::Get {
            key,
            host,
            port,
            password,
            tls,
            db,
        } => {
            let cfg = DumpConfig {
                host,
                port,
                password,
                tls,
                db,
                ..Default::default()
            };

            let mut dumper = Dumper::connect(&cfg).await?;
            let record = dumper.read_record(&key).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Ping {
            host,
            port,
            password,
            tls,
            db,
        } => {
            let cfg = DumpConfig {
                host,
                port,
                password,
                tls,
                db,
                ..Default::default()
            };

            Dumper::connect(&cfg).await?;
            println!("PONG");
        }
    }

    Ok(())
}

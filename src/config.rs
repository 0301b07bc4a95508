use std::fmt;

/// Connection and scan settings for one export run, resolved at startup.
/// The credential is held here and nowhere else; Debug output redacts it.
#[derive(Clone)]
pub struct DumpConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// Use an encrypted (TLS) transport
    pub tls: bool,
    /// Logical database index (0-15)
    pub db: i64,
    /// Optional MATCH glob applied to the scan
    pub pattern: Option<String>,
    /// COUNT hint for each SCAN page
    pub scan_count: usize,
}

impl DumpConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        DumpConfig {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Address for log lines; never includes the credential
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            tls: false,
            db: 0,
            pattern: None,
            scan_count: 100,
        }
    }
}

impl fmt::Debug for DumpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "password",
                &self.password.as_ref().map(|_| "<redacted>"),
            )
            .field("tls", &self.tls)
            .field("db", &self.db)
            .field("pattern", &self.pattern)
            .field("scan_count", &self.scan_count)
            .finish()
    }
}

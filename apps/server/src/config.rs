use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8088";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process configuration read from the environment (and `.env`, if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// JSON provider registrations file; without one every capability runs on its mock.
    pub providers_file: Option<PathBuf>,
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let listen_addr = std::env::var("AUTOFILL_LISTEN_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                DEFAULT_LISTEN_ADDR
                    .parse()
                    .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8088)))
            });

        let providers_file = std::env::var("AUTOFILL_PROVIDERS_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout = std::env::var("AUTOFILL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let cors_allow_origins = std::env::var("AUTOFILL_CORS_ALLOW_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            listen_addr,
            providers_file,
            request_timeout,
            cors_allow_origins,
        }
    }
}

use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub bind_port: u16,
    pub event_channel_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_host: env::var("CALL_BOARD_HOST")
                .unwrap_or_else(|_| {
                    warn!("CALL_BOARD_HOST not set, binding to 0.0.0.0");
                    "0.0.0.0".to_string()
                }),
            bind_port: env::var("CALL_BOARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| {
                    warn!("CALL_BOARD_PORT not set or invalid, using 3000");
                    3000
                }),
            event_channel_capacity: env::var("CALL_BOARD_EVENT_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(1000),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 3000,
            event_channel_capacity: 1000,
        }
    }
}

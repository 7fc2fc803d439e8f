use std::{env, fmt, net::SocketAddr};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ROOM_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Snapshots buffered per room before slow sockets start skipping.
    pub room_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            room_capacity: DEFAULT_ROOM_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "invalid {}: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Reads `JANTAKU_ADDR` and `JANTAKU_ROOM_CAPACITY`; unset keys fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup("JANTAKU_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "JANTAKU_ADDR",
            value: addr_raw.clone(),
        })?;

        let room_capacity = match lookup("JANTAKU_ROOM_CAPACITY") {
            None => DEFAULT_ROOM_CAPACITY,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "JANTAKU_ROOM_CAPACITY",
                        value: raw,
                    })
                }
            },
        };

        Ok(ServerConfig {
            addr,
            room_capacity,
        })
    }
}

use serde::Deserialize;
use std::net::IpAddr;
use std::sync::LazyLock;

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".into());
    let config_file = std::fs::read_to_string(path).expect("failed to open config file");
    serde_yaml::from_str(&config_file).expect("failed to parse config file")
});

#[derive(Deserialize)]
pub struct Config {
    pub postgres: Postgres,
    pub api: Api,
    #[serde(default)]
    pub loki: Option<Loki>,
    #[serde(default)]
    pub rate_limit: RateLimit,
}

#[derive(Deserialize)]
pub struct Postgres {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
}

impl Postgres {
    pub fn url(&self) -> String {
        format!(
            "postgres://{user}:{password}@{host}:{port}/{db_name}",
            user = self.user,
            password = self.password,
            host = self.host,
            port = self.port,
            db_name = self.db_name
        )
    }
}

#[derive(Deserialize)]
pub struct Api {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Loki {
    pub url: String,
}

/// Token bucket settings applied per client address.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct RateLimit {
    pub enabled: bool,
    pub capacity: f64,
    pub refill_per_sec: f64,
    /// Peers whose `x-forwarded-for` header is believed. Empty means the header is ignored.
    pub trusted_proxies: Vec<IpAddr>,
    /// Bucket count above which idle, fully refilled buckets are swept.
    pub max_tracked_clients: usize,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 60.0,
            refill_per_sec: 1.0,
            trusted_proxies: Vec::new(),
            max_tracked_clients: 10_000,
        }
    }
}

use crate::error::ApiError;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use common::config::RateLimit;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// `None` when the peer address is unknown; those requests share one bucket.
type ClientKey = Option<IpAddr>;

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn refilled(&self, now: Instant, capacity: f64, refill_per_sec: f64) -> f64 {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * refill_per_sec).min(capacity)
    }
}

struct Buckets {
    entries: HashMap<ClientKey, Bucket>,
    last_sweep: Instant,
}

/// Token bucket per client address.
pub struct RateLimiter {
    buckets: Mutex<Buckets>,
    capacity: f64,
    refill_per_sec: f64,
    trusted_proxies: Vec<IpAddr>,
    max_tracked_clients: usize,
}

impl RateLimiter {
    pub fn new(config: &RateLimit) -> Self {
        Self {
            buckets: Mutex::new(Buckets {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            capacity: config.capacity,
            refill_per_sec: config.refill_per_sec,
            trusted_proxies: config.trusted_proxies.clone(),
            max_tracked_clients: config.max_tracked_clients,
        }
    }

    pub fn from_config(config: &RateLimit) -> Option<Self> {
        config.enabled.then(|| Self::new(config))
    }

    pub async fn allow(&self, key: ClientKey) -> bool {
        let now = Instant::now();
        let mut lock = self.buckets.lock().await;

        if lock.entries.len() >= self.max_tracked_clients
            && now.duration_since(lock.last_sweep) >= SWEEP_INTERVAL
        {
            let before = lock.entries.len();
            let (capacity, refill) = (self.capacity, self.refill_per_sec);
            lock.entries
                .retain(|_, bucket| bucket.refilled(now, capacity, refill) < capacity);
            lock.last_sweep = now;
            debug!("swept `{}` idle rate limit buckets", before - lock.entries.len());
        }

        let bucket = lock.entries.entry(key).or_insert_with(|| Bucket {
            tokens: self.capacity,
            last_refill: now,
        });
        bucket.tokens = bucket.refilled(now, self.capacity, self.refill_per_sec);
        bucket.last_refill = now;
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.buckets.lock().await.entries.len()
    }

    /// The peer address. Behind a trusted proxy, the right-most `x-forwarded-for` hop that is
    /// not itself a trusted proxy.
    fn client_key(&self, req: &Request) -> ClientKey {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())?;
        if !self.trusted_proxies.contains(&peer) {
            return Some(peer);
        }

        let hops = req
            .headers()
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .collect::<Vec<_>>();
        let client = hops
            .into_iter()
            .rev()
            .find(|hop| !self.trusted_proxies.contains(hop))
            .unwrap_or(peer);
        Some(client)
    }
}

pub async fn limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = limiter.client_key(&req);
    if !limiter.allow(key).await {
        warn!(client = ?key, path = %req.uri().path(), "rate limit exceeded");
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(req).await)
}

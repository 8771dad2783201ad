//! Remote store client for published release documents.
//!
//! Documents are addressed by a path-like key (`/ipns/<root>/<dist>/<ver>/dist.json`)
//! and read either through a Kubo RPC API (`/api/v0/cat`) or an HTTP gateway.
//!
//! # Configuration
//!
//! The backend is resolved in priority order:
//! 1. `--gateway` / `--ipfs-api` CLI flags
//! 2. `IPFS_GATEWAY` / `IPFS_API` environment variables
//! 3. Kubo RPC on `http://127.0.0.1:5001`
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Default Kubo RPC address, matching a stock local node.
pub const DEFAULT_IPFS_API: &str = "http://127.0.0.1:5001";

/// Read access to a content-addressed namespace.
pub trait RemoteStore {
    /// Fetch the document stored under `key` as UTF-8 text.
    fn cat(&self, key: &str) -> Result<String>;

    /// Human-readable location used in log lines.
    fn describe(&self) -> String;
}

/// Which HTTP surface a remote fetch goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteBackend {
    /// Kubo RPC API base address.
    KuboRpc(String),
    /// HTTP gateway base address.
    Gateway(String),
}

/// Blocking HTTP client for either backend.
pub struct HttpStore {
    backend: RemoteBackend,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(backend: RemoteBackend, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            backend,
            agent: ureq::Agent::new_with_config(config),
        }
    }

    fn fetch(&self, key: &str) -> Result<String> {
        let mut response = match &self.backend {
            RemoteBackend::KuboRpc(api) => {
                let url = format!("{}/api/v0/cat", api.trim_end_matches('/'));
                self.agent
                    .post(&url)
                    .query("arg", key)
                    .send_empty()
                    .with_context(|| format!("cat {key} via {url}"))?
            }
            RemoteBackend::Gateway(gateway) => {
                let url = gateway_url(gateway, key);
                self.agent
                    .get(&url)
                    .call()
                    .with_context(|| format!("GET {url}"))?
            }
        };
        response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("read response body for {key}"))
    }
}

impl RemoteStore for HttpStore {
    fn cat(&self, key: &str) -> Result<String> {
        let start = Instant::now();
        let body = self.fetch(key)?;
        tracing::debug!(
            key,
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_bytes = body.len(),
            "remote fetch complete"
        );
        Ok(body)
    }

    fn describe(&self) -> String {
        match &self.backend {
            RemoteBackend::KuboRpc(api) => format!("ipfs api {api}"),
            RemoteBackend::Gateway(gateway) => format!("gateway {gateway}"),
        }
    }
}

/// Join a gateway base and a namespace key without doubling the slash.
pub fn gateway_url(gateway: &str, key: &str) -> String {
    format!(
        "{}/{}",
        gateway.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_joins_key() {
        assert_eq!(
            gateway_url("https://ipfs.io/", "/ipns/dist.ipfs.tech/kubo/v0.20.0/dist.json"),
            "https://ipfs.io/ipns/dist.ipfs.tech/kubo/v0.20.0/dist.json"
        );
        assert_eq!(
            gateway_url("http://127.0.0.1:8080", "ipns/dist.ipfs.tech/kubo/dist.json"),
            "http://127.0.0.1:8080/ipns/dist.ipfs.tech/kubo/dist.json"
        );
    }

    #[test]
    fn describe_names_backend() {
        let store = HttpStore::new(
            RemoteBackend::Gateway("https://ipfs.io".to_string()),
            Duration::from_secs(1),
        );
        assert_eq!(store.describe(), "gateway https://ipfs.io");
    }

    #[test]
    fn unreachable_api_is_an_error() {
        // Port 9 (discard) is not expected to host a Kubo API.
        let store = HttpStore::new(
            RemoteBackend::KuboRpc("http://127.0.0.1:9".to_string()),
            Duration::from_secs(2),
        );
        let err = store
            .cat("/ipns/dist.ipfs.tech/kubo/v0.20.0/dist.json")
            .expect_err("fetch should fail");
        assert!(format!("{err:#}").contains("/ipns/dist.ipfs.tech/kubo/v0.20.0/dist.json"));
    }
}

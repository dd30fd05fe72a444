use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/test";
pub const DEFAULT_DATABASE: &str = "test";
pub const COLLECTION: &str = "messages";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_MONGO_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    Memory,
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_url: String,
    pub database: String,
    pub collection: String,
    pub listen_addr: SocketAddr,
    pub metrics_addr: Option<SocketAddr>,
    pub backend: Backend,
    pub mongo_timeout: Duration,
    pub log_level: String,
    /// Raw `MONGO_URL`, `DB_PORT` and `COMPOSE_DB_HOST`, kept for the startup log.
    pub url_sources: UrlSources,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSources {
    pub mongo_url: Option<String>,
    pub db_port: Option<String>,
    pub compose_db_host: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Resolve configuration from any key lookup (the process environment in
    /// production, a map in tests). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.is_empty());

        let url_sources = UrlSources {
            mongo_url: get("MONGO_URL"),
            db_port: get("DB_PORT"),
            compose_db_host: get("COMPOSE_DB_HOST"),
        };
        let mongo_url = resolve_mongo_url(
            url_sources.mongo_url.clone(),
            url_sources.db_port.clone(),
            url_sources.compose_db_host.clone(),
        );
        let database = database_from_url(&mongo_url).unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR is not a socket address")?;
        let metrics_addr = get("METRICS_ADDR")
            .map(|v| v.parse().context("METRICS_ADDR is not a socket address"))
            .transpose()?;

        let backend = match get("MSGSTORE_BACKEND").as_deref() {
            None | Some("mongo") => Backend::Mongo,
            Some("memory") => Backend::Memory,
            Some(other) => bail!("MSGSTORE_BACKEND must be `mongo` or `memory`, got {other:?}"),
        };

        let timeout_secs = match get("MONGO_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().context("MONGO_TIMEOUT_SECS is not a number")?,
            None => DEFAULT_MONGO_TIMEOUT_SECS,
        };

        Ok(Config {
            mongo_url,
            database,
            collection: COLLECTION.to_string(),
            listen_addr,
            metrics_addr,
            backend,
            mongo_timeout: Duration::from_secs(timeout_secs),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            url_sources,
        })
    }
}

/// Later sources override earlier ones: default, then `MONGO_URL`, then a
/// docker link address (`DB_PORT`), then a docker-compose host name.
pub fn resolve_mongo_url(mongo_url: Option<String>, db_port: Option<String>, compose_host: Option<String>) -> String {
    let mut url = DEFAULT_MONGO_URL.to_string();
    if let Some(u) = mongo_url {
        url = u;
    }
    if let Some(link) = db_port {
        // e.g. tcp://172.17.0.2:27017
        url = format!("{}/test", link.replacen("tcp", "mongodb", 1));
    }
    if let Some(host) = compose_host {
        url = format!("mongodb://{host}:27017/test");
    }
    url
}

/// Database name from the path component of a connection string, if any.
pub fn database_from_url(url: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let (_, path) = rest.split_once('/')?;
    let name = path.split('?').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

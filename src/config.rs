use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    File(PathBuf),
    Memory,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let bind_addr = get("SMASH_BIND_ADDR", "0.0.0.0:3000");
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("SMASH_BIND_ADDR is not a socket address: {bind_addr}"))?;

        let store = match get("SMASH_STORE", "file").to_lowercase().as_str() {
            "file" => StoreKind::File(PathBuf::from(get("SMASH_DATA_FILE", "smashings.json"))),
            "memory" => StoreKind::Memory,
            other => bail!("SMASH_STORE must be 'file' or 'memory', got '{other}'"),
        };

        let public_dir = PathBuf::from(get("SMASH_PUBLIC_DIR", "public"));

        Ok(Self {
            bind_addr,
            store,
            public_dir,
        })
    }
}

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 9090;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub address: SocketAddr,
    /// JSON seed document loaded into the database at startup, if set.
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = match lookup("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("HOST {host:?} is not an IP address"))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT {port:?} is not a valid port"))?,
            None => DEFAULT_PORT,
        };
        Ok(Config {
            database_url,
            address: SocketAddr::new(host, port),
            seed_file: lookup("SEED_FILE").map(PathBuf::from),
        })
    }
}

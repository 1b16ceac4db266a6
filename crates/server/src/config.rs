//! Server configuration, from flags or environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use catalog::{CatalogStore, demo_catalog};

/// Movie ratings HTTP API
#[derive(Debug, Clone, Parser)]
#[command(name = "movies-api")]
#[command(about = "Serve movie search, top-rated lists and ratings over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "MOVIES_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Directory holding genres.dat, movies.dat, users.dat and ratings.dat.
    /// Without it the server runs on the built-in demo data and keeps
    /// ratings in memory only.
    #[arg(long, env = "MOVIES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Open the store this configuration points at
    pub fn open_store(&self) -> catalog::Result<CatalogStore> {
        match &self.data_dir {
            Some(dir) => CatalogStore::open(dir),
            None => Ok(CatalogStore::in_memory(demo_catalog())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["movies-api"]).unwrap();

        // Either variable may be set in the environment running the tests
        if std::env::var_os("MOVIES_BIND").is_none() {
            assert_eq!(config.bind.port(), 8080);
        }
        if std::env::var_os("MOVIES_DATA_DIR").is_none() {
            assert!(config.data_dir.is_none());
            let store = config.open_store().unwrap();
            assert_eq!(store.read().counts(), (2, 3, 5));
        }
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "movies-api",
            "--bind",
            "0.0.0.0:9000",
            "--data-dir",
            "/srv/movies",
        ])
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/movies")));
    }
}

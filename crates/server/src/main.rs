// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! HTTP server for the innkeep hotel back office.
//!
//! Owns the clock, the database connection and the router. Every route
//! delegates to a handler in `innkeep_api`.

mod error;
mod extract;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use clap::Parser;
use innkeep_api::Now;
use innkeep_domain::{ClockError, HotelClock};
use innkeep_persistence::SqlitePersistence;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use routes::build_router;

/// Command-line and environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Hotel back office HTTP server", long_about = None)]
struct Args {
    /// Path to the `SQLite` database file (omit for an in-memory database)
    #[arg(short, long, env = "INNKEEP_DATABASE")]
    database: Option<String>,

    /// Address to bind to
    #[arg(short, long, env = "INNKEEP_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, env = "INNKEEP_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA time zone of the hotel, used to decide what "today" is
    #[arg(short, long, env = "INNKEEP_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// Tracing filter directive
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

/// Startup configuration errors.
#[derive(Debug, Error)]
enum ConfigError {
    #[error("invalid bind address '{address}': {source}")]
    BindAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error("invalid log filter '{filter}'")]
    LogFilter { filter: String },
}

impl Args {
    fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|source| ConfigError::BindAddress {
                address: self.bind.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_level).map_err(|_| ConfigError::LogFilter {
            filter: self.log_level.clone(),
        })
    }
}

/// Shared state handed to every route.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<SqlitePersistence>>,
    clock: HotelClock,
}

impl AppState {
    fn new(persistence: SqlitePersistence, clock: HotelClock) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            clock,
        }
    }

    /// The current instant and the hotel's calendar date.
    fn now(&self) -> Now {
        Now::at(&self.clock, OffsetDateTime::now_utc())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.env_filter()?)
        .init();

    info!("Initializing innkeep server");

    let clock: HotelClock = HotelClock::new(&args.timezone).map_err(ConfigError::from)?;
    info!(timezone = clock.timezone_name(), "Hotel clock configured");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app = build_router(AppState::new(persistence, clock));

    let addr: SocketAddr = args.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

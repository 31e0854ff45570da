//! Server configuration.
//!
//! Configuration flows from CLI flags and `ROUTEGUIDE_*` environment
//! variables (via clap) into a validated [`ServerConfig`]. The raw
//! [`CliArgs`] are never used directly by the rest of the server.

use clap::Parser;
use std::path::PathBuf;

/// Command-line and environment configuration for the route guide server.
#[derive(Parser, Debug)]
#[command(name = "routeguide-tonic-server", version, about)]
pub struct CliArgs {
    /// Address to bind: a TCP socket address, or a filesystem path when
    /// `--uds` is set.
    #[arg(long, env = "ROUTEGUIDE_ADDR", default_value = "[::]:50052")]
    pub addr: String,

    /// Bind a Unix domain socket instead of TCP.
    #[arg(long, env = "ROUTEGUIDE_UDS", default_value_t = false)]
    pub uds: bool,

    /// Path to the JSON feature database loaded at startup.
    #[arg(long, env = "ROUTEGUIDE_DB", default_value = "data/route_guide_db.json")]
    pub database: PathBuf,

    /// Maximum number of concurrently active calls per connection.
    #[arg(long, env = "ROUTEGUIDE_MAX_CONCURRENT_CALLS", default_value_t = 32)]
    pub max_concurrent_calls: usize,

    /// Capacity (in items) of each streaming response buffer.
    #[arg(long, env = "ROUTEGUIDE_STREAM_BUFFER_SIZE", default_value_t = 16)]
    pub stream_buffer_size: usize,
}

/// Validated runtime configuration derived from [`CliArgs`].
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// TCP socket address, or socket path when `uds` is set.
    pub server_addr: String,
    /// Whether `server_addr` names a Unix domain socket.
    pub uds: bool,
    /// Path to the JSON feature database.
    pub database: PathBuf,
    /// Admission cap: calls beyond this wait for a slot.
    pub max_concurrent_calls: usize,
    /// Bound on in-flight items per streaming response.
    pub stream_buffer_size: usize,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        anyhow::ensure!(
            args.max_concurrent_calls > 0,
            "max_concurrent_calls must be greater than 0"
        );
        anyhow::ensure!(
            args.stream_buffer_size > 0,
            "stream_buffer_size must be greater than 0"
        );

        Ok(Self {
            server_addr: args.addr,
            uds: args.uds,
            database: args.database,
            max_concurrent_calls: args.max_concurrent_calls,
            stream_buffer_size: args.stream_buffer_size,
        })
    }
}

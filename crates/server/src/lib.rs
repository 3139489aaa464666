//! UDP forwarding proxy: accept loop, upstream transport, configuration.
pub mod config;
pub mod errors;
pub mod proxy;
pub mod upstream;

pub use config::{CliOverrides, Config};
pub use errors::ServerError;
pub use proxy::{bind_socket, ProxyServer};
pub use upstream::{UdpUpstream, UpstreamTransport};

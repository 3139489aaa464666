//! Upstream transport: one fresh UDP socket and one round trip per query.
//! The query bytes go out exactly as received; the reply bytes come back
//! exactly as the upstream sent them.

use crate::errors::ServerError;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Sends `query` upstream and returns the raw reply bytes.
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, ServerError>;
}

/// DNS over UDP upstream. No retry, no fallback server, no correlation of
/// the reply ID against the query ID.
pub struct UdpUpstream {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpUpstream {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    fn unreachable(&self, source: std::io::Error) -> ServerError {
        ServerError::UpstreamUnreachable {
            server: self.server_addr.to_string(),
            source,
        }
    }
}

#[async_trait]
impl UpstreamTransport for UdpUpstream {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, ServerError> {
        // Bind to ephemeral port (0 = OS assigns), matching address family
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unreachable(e))?;

        let bytes_sent = socket
            .send_to(query, self.server_addr)
            .await
            .map_err(|e| self.unreachable(e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query forwarded"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| ServerError::UpstreamTimeout {
                    server: self.server_addr.to_string(),
                })?
                .map_err(|e| self.unreachable(e))?;

        // The reply is relayed regardless; an unexpected source is only noted.
        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }
}

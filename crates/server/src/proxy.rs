//! Accept loop. Each inbound datagram is parsed only for inspection, then
//! handed to an independent task that does the upstream round trip and
//! relays the raw reply. A failed parse or a failed round trip never stops
//! the loop; the affected client simply gets no reply.

use crate::errors::ServerError;
use crate::upstream::UpstreamTransport;
use dns_relay_proto::DnsMessage;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Maximum inbound datagram size accepted from clients
const MAX_QUERY_SIZE: usize = 4096;

/// Binds the listening socket, mapping the failure to the address that
/// could not be bound.
pub async fn bind_socket(addr: SocketAddr) -> Result<UdpSocket, ServerError> {
    UdpSocket::bind(addr).await.map_err(|e| ServerError::Bind {
        addr: addr.to_string(),
        source: e,
    })
}

pub struct ProxyServer<T: UpstreamTransport + 'static> {
    socket: Arc<UdpSocket>,
    upstream: Arc<T>,
}

impl<T: UpstreamTransport + 'static> ProxyServer<T> {
    pub fn new(socket: UdpSocket, upstream: T) -> Self {
        Self {
            socket: Arc::new(socket),
            upstream: Arc::new(upstream),
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serves until `shutdown` is cancelled. Cancellation stops the loop
    /// after the current iteration; in-flight requests run to completion.
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut recv_buf = [0u8; MAX_QUERY_SIZE];

        if let Ok(addr) = self.socket.local_addr() {
            info!(listen = %addr, "DNS relay accepting queries");
        }

        loop {
            let (len, client) = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, stopping accept loop");
                    return;
                }
                recv = self.socket.recv_from(&mut recv_buf) => match recv {
                    Ok(r) => r,
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            if len == 0 {
                continue;
            }

            self.inspect(&recv_buf[..len], client);

            let query: Vec<u8> = recv_buf[..len].to_vec();
            let socket = self.socket.clone();
            let upstream = self.upstream.clone();
            tokio::spawn(async move {
                match upstream.exchange(&query).await {
                    Ok(reply) => {
                        if let Err(e) = socket.send_to(&reply, client).await {
                            warn!(client = %client, error = %e, "Failed to relay reply");
                        }
                    }
                    Err(e) => {
                        warn!(client = %client, error = %e, "Upstream exchange failed");
                    }
                }
            });
        }
    }

    /// Decode for logging only. A datagram this codec cannot parse is still
    /// forwarded unchanged.
    fn inspect(&self, datagram: &[u8], client: SocketAddr) {
        match DnsMessage::parse(datagram) {
            Ok(msg) => match msg.questions.first() {
                Some(q) => debug!(
                    client = %client,
                    id = msg.id,
                    name = %q.name,
                    qtype = %q.qtype,
                    class = %q.class,
                    "Query received"
                ),
                None => debug!(client = %client, id = msg.id, "Query with no question"),
            },
            Err(e) => warn!(
                client = %client,
                len = datagram.len(),
                error = %e,
                "Unparseable datagram, forwarding anyway"
            ),
        }
    }
}

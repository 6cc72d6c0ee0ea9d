//! Starting and stopping the liveness listener.
//!
//! [`start`] binds the socket before returning, so a request issued right
//! after it resolves is accepted by the kernel and answered once the spawned
//! serving task polls the listener. Serving happens on its own tokio task; the
//! returned [`LivenessServer`] is only needed to find the bound address or to
//! stop the probe. Dropping it leaves the probe running for the rest of the
//! process.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    api::{self, LIVENESS_PATH},
    error::{ProbeError, Result},
};

/// Handle to a running liveness endpoint.
#[derive(Debug)]
pub struct LivenessServer {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    /// `None` once the serving task has been joined.
    task: Option<JoinHandle<std::io::Result<()>>>,
}

/// Start the probe on `0.0.0.0:port`.
///
/// Fails with [`ProbeError::Bind`] when the port is taken or not bindable.
pub async fn start(port: u16) -> Result<LivenessServer> {
    start_on(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)).await
}

/// Start the probe on an explicit address. Port 0 picks an ephemeral port;
/// read it back with [`LivenessServer::local_addr`].
pub async fn start_on(addr: SocketAddr) -> Result<LivenessServer> {
    let listener = TcpListener::bind(addr).await.map_err(|source| {
        warn!(%addr, error = %source, "liveness listener bind failed");
        ProbeError::Bind { addr, source }
    })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ProbeError::Bind { addr, source })?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    let task = tokio::spawn(async move {
        axum::serve(listener, api::router())
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await
    });

    info!(%local_addr, path = LIVENESS_PATH, "liveness probe listening");

    Ok(LivenessServer {
        local_addr,
        shutdown,
        task: Some(task),
    })
}

impl LivenessServer {
    /// The address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// URL a local client can use to reach the probe.
    ///
    /// Wildcard bind addresses are replaced with the matching loopback.
    pub fn url(&self) -> String {
        local_url(self.local_addr)
    }

    /// Wait for the serving task to end on its own.
    ///
    /// Only returns early if the server hits an I/O error or the task dies;
    /// a healthy probe keeps this pending until [`shutdown`](Self::shutdown).
    /// The task's outcome is reported once; later calls return `Ok(())`.
    /// Dropping the future before it resolves leaves the task joinable.
    pub async fn stopped(&mut self) -> Result<()> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };
        let joined = task.await;
        self.task = None;
        joined?.map_err(ProbeError::Serve)
    }

    /// Stop accepting connections, let in-flight requests finish, and release
    /// the port.
    pub async fn shutdown(mut self) -> Result<()> {
        info!(local_addr = %self.local_addr, "stopping liveness probe");
        self.shutdown.cancel();
        self.stopped().await?;
        info!(local_addr = %self.local_addr, "liveness probe stopped");
        Ok(())
    }
}

/// `http://<addr>/liveness`, with a wildcard IP swapped for the loopback of
/// the same family.
pub fn local_url(addr: SocketAddr) -> String {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}{LIVENESS_PATH}", SocketAddr::new(ip, addr.port()))
}

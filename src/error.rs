//! Error type for the liveness probe.
//!
//! The probe itself has exactly one way to fail at runtime: the listener
//! cannot be bound. Everything after that (serving, stopping) only fails on
//! I/O errors from the underlying server or a panicked serving task, and
//! [`ProbeError`] carries those through to whoever called
//! [`LivenessServer::shutdown`](crate::server::LivenessServer::shutdown).

use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while starting, running or stopping the liveness endpoint.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The listener could not be bound, typically because the port is
    /// already in use or requires privileges the process does not have.
    #[error("failed to bind liveness listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("liveness server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The serving task panicked or was aborted.
    #[error("liveness server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_names_the_address() {
        let err = ProbeError::Bind {
            addr: "127.0.0.1:5001".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:5001"), "message: {msg}");
        assert!(msg.contains("address in use"), "message: {msg}");
    }

    #[test]
    fn bind_error_exposes_io_source() {
        use std::error::Error as _;

        let err = ProbeError::Bind {
            addr: "0.0.0.0:80".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = err
            .source()
            .and_then(|s| s.downcast_ref::<std::io::Error>())
            .expect("io::Error source");
        assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
    }
}

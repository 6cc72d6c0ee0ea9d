//! HTTP liveness probe.
//!
//! Serves `GET /liveness` → `200 OK`, `I'm alive!\n` on a port of the
//! caller's choosing, for supervisors that only need to know the process is
//! up and accepting connections.
//!
//! ```rust,no_run
//! # async fn run() -> liveness_probe::Result<()> {
//! let probe = liveness_probe::start(5001).await?;
//! // ... GET http://localhost:5001/liveness → "I'm alive!\n"
//! probe.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use api::{LIVENESS_BODY, LIVENESS_PATH};
pub use config::Config;
pub use error::{ProbeError, Result};
pub use server::{start, start_on, LivenessServer};

use std::{process::ExitCode, time::Duration};

use anyhow::Context;
use tokio::signal;
use tracing::info;

use liveness_probe::Config;

/// How long `--healthcheck` waits for the probe before declaring it dead.
const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Both modes read the same config, so `--healthcheck` hits the port the
    // server actually bound.
    let config = Config::from_env()?;

    // When invoked as a Docker HEALTHCHECK, hit /liveness and exit immediately.
    // This avoids needing any external tool (curl/wget) in the container image.
    if std::env::args().nth(1).as_deref() == Some("--healthcheck") {
        return healthcheck(&config).await;
    }

    // RUST_LOG wins over the config file's log_level.
    let fallback_filter = config
        .probe
        .log_level
        .clone()
        .unwrap_or_else(|| "liveness_probe=info,tower_http=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .init();

    let addr = config.probe.socket_addr();
    info!(%addr, "liveness-probe starting");

    let mut server = liveness_probe::start_on(addr)
        .await
        .context("liveness probe failed to start")?;

    let finished = tokio::select! {
        result = server.stopped() => Some(result),
        signal = shutdown_signal() => {
            info!(signal, "shutdown signal received");
            None
        }
    };

    match finished {
        Some(result) => result.context("liveness probe stopped unexpectedly")?,
        None => server.shutdown().await.context("liveness probe shutdown failed")?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolves with the name of the first termination signal received.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}

/// `liveness-probe --healthcheck`: GET the configured probe over loopback.
///
/// Exit 0 on a 2xx, 1 on any other status. Connection and timeout errors
/// propagate, which also exits 1.
async fn healthcheck(config: &Config) -> anyhow::Result<ExitCode> {
    let url = config.probe.local_url();
    let client = reqwest::Client::builder()
        .timeout(HEALTHCHECK_TIMEOUT)
        .build()
        .context("building healthcheck client")?;

    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    if resp.status().is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("GET {url} returned {}", resp.status());
        Ok(ExitCode::FAILURE)
    }
}

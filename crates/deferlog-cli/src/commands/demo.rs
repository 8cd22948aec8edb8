//! Demo command
//!
//! Usage: deferlog demo --file <FILE> [--delay-ms <MS>] [--diagnostics]
//!
//! Logs through two labelled loggers before the sink exists, waits, then
//! initializes and keeps logging. The queued entries come out first, in
//! call order, with elapsed times measured when they were logged.

use super::ConfigArgs;
use clap::Args;
use deferlog_core::diagnostics::{self, Profile};
use deferlog_core::{meta, LoggingContext, Sensitive};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Pause before initialization, in milliseconds
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Print the facade's own diagnostics to stderr
    #[arg(long)]
    pub diagnostics: bool,
}

/// Execute demo command
pub async fn execute(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.diagnostics {
        diagnostics::init(Profile::Development);
    }
    let config = args.config.to_config()?;

    let mut app = deferlog_core::logger("app");
    let mut db = deferlog_core::logger("db");

    app.info("starting", meta![]);
    db.debug(
        "opening pool",
        meta![json!({ "host": "localhost", "size": 4 })],
    );

    tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;

    db.warn("slow handshake", meta!["primary", 5432]);
    let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    db.error("replica unavailable", Some(&refused));
    app.info(
        "credentials loaded",
        meta![json!({ "user": "svc" }), Sensitive::new("hunter2")],
    );

    let queued = LoggingContext::global().pending().len();
    deferlog_core::init(config).await?;

    app.info("sink ready", meta![json!({ "replayed": queued })]);
    app.verbose("shutting down", meta![]);
    Ok(())
}

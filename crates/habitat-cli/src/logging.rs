//! Tracing setup shared by both binaries.
//!
//! Output goes to stderr so stdout stays clean for JSON. `RUST_LOG`
//! wins over the default level; `verbose` forces `debug`. Records
//! emitted through the `log` facade (the engine crate) are forwarded
//! into the same subscriber.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn init_tracing(default_level: &str, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = subscriber.try_init();
}

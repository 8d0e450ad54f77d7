use care::commands::Cli;
use care::libs::messages::macros::is_debug_mode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How long exit waits for blocking tasks, such as an open notification
/// question, before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("care=debug")))
            .init();
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(Cli::menu());
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

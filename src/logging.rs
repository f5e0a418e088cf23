use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("connector_pairing=debug,info")
        } else {
            EnvFilter::new("connector_pairing=info")
        }
    })
}

/// Installs the stderr subscriber for the CLI. Stdout stays reserved for output.
pub fn init_cli_logger(verbose: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let _ = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer.compact()).try_init()
    };
}

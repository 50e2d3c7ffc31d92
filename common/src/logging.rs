use crate::config::CONFIG;
use std::fs::File;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

fn env_filter(module_name: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{module_name}=debug,common=info")))
}

/// Installs stdout and file layers, plus a loki layer when `loki.url` is configured.
/// Must be called from within a tokio runtime.
pub fn setup_logging(module_name: &str) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter(module_name));

    std::fs::create_dir_all(module_name).expect("failed to create log directory");
    let file = File::create(format!("{module_name}/log.txt")).expect("failed to create log file");
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter(module_name));

    let loki_log = CONFIG.loki.as_ref().map(|loki| {
        let (layer, task) = tracing_loki::builder()
            .label("application", module_name)
            .expect("invalid loki label")
            .extra_field("pid", std::process::id().to_string())
            .expect("invalid loki field")
            .build_url(Url::parse(&loki.url).expect("invalid loki url"))
            .expect("could not build loki");
        tokio::spawn(task);
        layer.with_filter(env_filter(module_name))
    });

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(stdout_log)
            .with(file_log)
            .with(loki_log),
    )
    .expect("failed to set global default");
}
